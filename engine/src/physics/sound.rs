//! Sound service seam
//!
//! The engine asks for an impact effect when two bodies meet with a large
//! closing velocity. Playback is fire-and-forget: nothing is awaited and
//! nothing is returned.

/// Effect playback used for impact sounds.
pub trait SoundService {
    /// Plays effect `effect` from the host's sound table.
    fn play(&mut self, effect: usize, looping: bool);
}

/// Sound service that plays nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl SoundService for Silent {
    fn play(&mut self, _effect: usize, _looping: bool) {}
}

/// Sound service that records requests instead of playing them.
///
/// Useful for headless hosts and for tests.
#[derive(Debug, Default, Clone)]
pub struct SoundLog {
    /// (effect, looping) in request order
    pub played: Vec<(usize, bool)>,
}

impl SoundService for SoundLog {
    fn play(&mut self, effect: usize, looping: bool) {
        self.played.push((effect, looping));
    }
}
