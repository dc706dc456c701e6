//! Absurd Dilemmas: fetch a scenario, pick a side, repeat

use super::{Dilemma, Generator, dilemma_or_fallback};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    A,
    B,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DilemmaSession {
    pub dilemma: Option<Dilemma>,
    pub choice: Option<Choice>,
    loading: bool,
}

impl DilemmaSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Clear the current pick and mark a fetch in flight
    pub fn begin_fetch(&mut self) {
        self.loading = true;
        self.choice = None;
    }

    pub fn receive(&mut self, dilemma: Dilemma) {
        self.dilemma = Some(dilemma);
        self.loading = false;
    }

    /// Pick a side. Only the first pick per dilemma counts.
    pub fn choose(&mut self, choice: Choice) -> bool {
        if self.loading || self.dilemma.is_none() || self.choice.is_some() {
            return false;
        }
        self.choice = Some(choice);
        true
    }

    /// "Next Dilemma" is offered once a side has been picked
    pub fn can_advance(&self) -> bool {
        self.choice.is_some()
    }
}

/// Fetch the next dilemma into the session (fallback on failure)
pub async fn next<G: Generator>(session: &mut DilemmaSession, generator: &G) {
    session.begin_fetch();
    let dilemma = dilemma_or_fallback(generator).await;
    session.receive(dilemma);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::tests::ScriptedGenerator;
    use futures::executor::block_on;

    fn sample() -> Dilemma {
        Dilemma {
            scenario: "Forever".into(),
            option_a: "Only whisper".into(),
            option_b: "Only shout".into(),
        }
    }

    #[test]
    fn test_choose_once() {
        let generator = ScriptedGenerator {
            dilemma: Some(sample()),
            ..Default::default()
        };
        let mut session = DilemmaSession::new();
        assert!(!session.choose(Choice::A));

        block_on(next(&mut session, &generator));
        assert_eq!(session.dilemma, Some(sample()));
        assert!(!session.can_advance());
        assert!(session.choose(Choice::B));
        assert!(!session.choose(Choice::A));
        assert_eq!(session.choice, Some(Choice::B));
        assert!(session.can_advance());

        block_on(next(&mut session, &generator));
        assert_eq!(session.choice, None);
    }

    #[test]
    fn test_failure_uses_fallback() {
        let generator = ScriptedGenerator::default();
        let mut session = DilemmaSession::new();
        block_on(next(&mut session, &generator));
        assert_eq!(session.dilemma, Some(Dilemma::fallback()));
        assert!(!session.is_loading());
    }
}
