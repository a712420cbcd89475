use super::signal::GameSignal;
use crate::state::ActorRegistry;

/// Trait for systems that react to game signals.
/// Implement this for live meters, loggers, overlays, etc.
pub trait SignalHandler {
    /// Handle a single signal.
    ///
    /// The registry gives read access to every actor so handlers don't need
    /// to maintain duplicate state.
    fn handle_signal(&mut self, signal: &GameSignal, actors: &ActorRegistry);

    /// Handle multiple signals (default implementation calls handle_signal for each)
    fn handle_signals(&mut self, signals: &[GameSignal], actors: &ActorRegistry) {
        for signal in signals {
            self.handle_signal(signal, actors);
        }
    }
}
