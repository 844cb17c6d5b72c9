//! Game session state machine
//!
//! A session owns the guess grid, the letters typed for the active row, the
//! row pointer, the game status and the input lock. Every input is handled
//! synchronously and answered with the list of effects the front end should
//! apply; the session itself never touches the screen, plays sounds or sleeps.

use super::cues::{MessageCue, SoundCue};
use super::effect::{Effect, RowFlag, UnlockTicket};
use crate::core::{ClassificationRule, Feedback, KeyFeedback, WORD_LEN, Word, classify};
use crate::wordlists::Dictionary;
use std::time::Duration;

/// Number of guesses the player gets
pub const MAX_ATTEMPTS: usize = 5;

/// Delay before a rejected word unlocks input again
pub const DEFAULT_UNLOCK_DELAY: Duration = Duration::from_millis(3000);

/// Overall game status; Won and Lost are terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    InProgress,
    Won,
    Lost,
}

/// Player input forwarded by a front end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Letter(char),
    Backspace,
    Enter,
}

/// One square of the grid
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    letter: Option<u8>,
    classification: Option<Feedback>,
}

impl Cell {
    #[must_use]
    pub fn letter(&self) -> Option<char> {
        self.letter.map(char::from)
    }

    /// Feedback for a committed cell; `None` while the cell is not committed
    #[must_use]
    pub const fn classification(&self) -> Option<Feedback> {
        self.classification
    }
}

/// One attempt
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuessRow {
    cells: [Cell; WORD_LEN],
    committed: Option<Word>,
}

impl GuessRow {
    #[must_use]
    pub const fn cells(&self) -> &[Cell; WORD_LEN] {
        &self.cells
    }

    /// The accepted guess, set once when the row is submitted
    #[must_use]
    pub const fn committed(&self) -> Option<&Word> {
        self.committed.as_ref()
    }

    /// Feedback of a committed row, in column order
    #[must_use]
    pub fn feedback(&self) -> Option<[Feedback; WORD_LEN]> {
        self.committed.as_ref()?;
        let mut result = [Feedback::Missing; WORD_LEN];
        for (slot, cell) in result.iter_mut().zip(&self.cells) {
            *slot = cell.classification?;
        }
        Some(result)
    }
}

/// Tunables injected into the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub rule: ClassificationRule,
    pub unlock_delay: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            rule: ClassificationRule::Naive,
            unlock_delay: DEFAULT_UNLOCK_DELAY,
        }
    }
}

/// State of one playthrough
pub struct GameSession<'a, D: Dictionary + ?Sized> {
    dictionary: &'a D,
    options: SessionOptions,
    target: Word,
    rows: [GuessRow; MAX_ATTEMPTS],
    current_row: usize,
    buffer: Vec<u8>,
    status: Status,
    input_locked: bool,
    keys: KeyFeedback,
    generation: u64,
    lock_episode: u64,
}

impl<'a, D: Dictionary + ?Sized> GameSession<'a, D> {
    /// Start a session with a randomly drawn target
    pub fn new(dictionary: &'a D, options: SessionOptions) -> Self {
        let target = dictionary.pick_target();
        Self::with_target(dictionary, options, target)
    }

    /// Start a session with a known target
    ///
    /// # Examples
    /// ```
    /// use turbl::core::Word;
    /// use turbl::game::{GameSession, Input, SessionOptions, Status};
    /// use turbl::wordlists::WordList;
    ///
    /// let crane = Word::new("crane").unwrap();
    /// let dict = WordList::new(vec![crane.clone()], Vec::new()).unwrap();
    /// let mut session = GameSession::with_target(&dict, SessionOptions::default(), crane);
    ///
    /// for ch in "crane".chars() {
    ///     session.handle(Input::Letter(ch));
    /// }
    /// session.handle(Input::Enter);
    /// assert_eq!(session.status(), Status::Won);
    /// ```
    pub fn with_target(dictionary: &'a D, options: SessionOptions, target: Word) -> Self {
        Self {
            dictionary,
            options,
            target,
            rows: Default::default(),
            current_row: 0,
            buffer: Vec::with_capacity(WORD_LEN),
            status: Status::InProgress,
            input_locked: false,
            keys: KeyFeedback::new(),
            generation: 0,
            lock_episode: 0,
        }
    }

    /// Throw the current game away and start over with a new target
    ///
    /// Allowed in any state. Unlock tickets issued before the reset become stale.
    pub fn reset(&mut self) -> Vec<Effect> {
        let target = self.dictionary.pick_target();
        self.reset_with_target(target)
    }

    pub fn reset_with_target(&mut self, target: Word) -> Vec<Effect> {
        let generation = self.generation.wrapping_add(1);
        *self = Self {
            generation,
            ..Self::with_target(self.dictionary, self.options, target)
        };
        tracing::info!(generation, "new game started");

        vec![Effect::BoardCleared, Effect::message(MessageCue::Start)]
    }

    /// Handle one input event
    ///
    /// An input that is not acceptable in the current state changes nothing
    /// and yields a single `error` sound.
    pub fn handle(&mut self, input: Input) -> Vec<Effect> {
        if !self.accepts_input() {
            return Self::reject(input);
        }

        match input {
            Input::Letter(ch) => self.type_letter(ch),
            Input::Backspace => self.erase_letter(),
            Input::Enter => self.submit(),
        }
    }

    /// Timer callback for `Effect::ScheduleUnlock`
    ///
    /// Only the ticket of the live lock episode clears the lock; anything else
    /// is ignored without effects.
    pub fn unlock(&mut self, ticket: UnlockTicket) -> Vec<Effect> {
        let live = self.input_locked
            && ticket.generation == self.generation
            && ticket.episode == self.lock_episode;
        if !live {
            tracing::debug!(?ticket, "ignoring stale unlock");
            return Vec::new();
        }

        self.input_locked = false;
        vec![
            Effect::flag(self.current_row, RowFlag::Error, false),
            Effect::message(MessageCue::Confirm),
        ]
    }

    fn accepts_input(&self) -> bool {
        self.status == Status::InProgress && !self.input_locked
    }

    fn reject(input: Input) -> Vec<Effect> {
        tracing::trace!(?input, "input rejected");
        vec![Effect::Sound(SoundCue::Error)]
    }

    fn type_letter(&mut self, ch: char) -> Vec<Effect> {
        let letter = match u8::try_from(ch.to_ascii_lowercase()) {
            Ok(letter) if letter.is_ascii_lowercase() && self.buffer.len() < WORD_LEN => letter,
            _ => return Self::reject(Input::Letter(ch)),
        };

        let row = self.current_row;
        let col = self.buffer.len();
        self.buffer.push(letter);
        self.rows[row].cells[col].letter = Some(letter);

        let mut effects = vec![
            Effect::Sound(SoundCue::Keystroke),
            Effect::Cell {
                row,
                col,
                letter: Some(char::from(letter)),
                classification: None,
            },
        ];
        if self.buffer.len() == WORD_LEN {
            effects.push(Effect::flag(row, RowFlag::Full, true));
            effects.push(Effect::message(MessageCue::Confirm));
        }
        effects
    }

    fn erase_letter(&mut self) -> Vec<Effect> {
        let was_full = self.buffer.len() == WORD_LEN;
        if self.buffer.pop().is_none() {
            return Self::reject(Input::Backspace);
        }

        let row = self.current_row;
        let col = self.buffer.len();
        self.rows[row].cells[col].letter = None;

        let mut effects = Vec::with_capacity(4);
        if was_full {
            effects.push(Effect::flag(row, RowFlag::Full, false));
            effects.push(Effect::message(MessageCue::EnterWord));
        }
        effects.push(Effect::Sound(SoundCue::Delete));
        effects.push(Effect::Cell {
            row,
            col,
            letter: None,
            classification: None,
        });
        effects
    }

    fn submit(&mut self) -> Vec<Effect> {
        let word = <[u8; WORD_LEN]>::try_from(self.buffer.as_slice())
            .ok()
            .and_then(|letters| Word::from_letters(letters).ok());
        let Some(word) = word else {
            return Self::reject(Input::Enter);
        };

        if self.dictionary.is_valid(&word) {
            self.commit(word)
        } else {
            self.lock(&word)
        }
    }

    fn lock(&mut self, word: &Word) -> Vec<Effect> {
        self.input_locked = true;
        self.lock_episode += 1;
        tracing::debug!(%word, row = self.row_number(), "word not in dictionary");

        let ticket = UnlockTicket {
            generation: self.generation,
            episode: self.lock_episode,
        };
        vec![
            Effect::flag(self.current_row, RowFlag::Error, true),
            Effect::Sound(SoundCue::Error),
            Effect::message(MessageCue::NoExist),
            Effect::ScheduleUnlock {
                ticket,
                after: self.options.unlock_delay,
            },
        ]
    }

    fn commit(&mut self, word: Word) -> Vec<Effect> {
        let row = self.current_row;
        let feedback = classify(&word, &self.target, self.options.rule);

        let mut effects = Vec::with_capacity(2 * WORD_LEN + 3);
        for (col, (&letter, classification)) in word.chars().iter().zip(feedback).enumerate() {
            self.rows[row].cells[col].classification = Some(classification);
            effects.push(Effect::Cell {
                row,
                col,
                letter: Some(char::from(letter)),
                classification: Some(classification),
            });
            if let Some(best) = self.keys.record(letter, classification) {
                effects.push(Effect::Key {
                    letter: char::from(letter),
                    best,
                });
            }
        }

        let won = word == self.target;
        tracing::debug!(%word, row = self.row_number(), won, "guess committed");
        self.rows[row].committed = Some(word);

        if won {
            self.status = Status::Won;
            tracing::info!(attempts = self.row_number(), "game won");
            effects.push(Effect::flag(row, RowFlag::Winner, true));
            effects.push(Effect::message(MessageCue::Won));
            effects.push(Effect::Sound(SoundCue::Won));
            return effects;
        }

        effects.push(Effect::flag(row, RowFlag::Full, false));
        if row + 1 == MAX_ATTEMPTS {
            self.status = Status::Lost;
            tracing::info!(answer = %self.target, "game lost");
            effects.push(Effect::Message {
                cue: MessageCue::Lost,
                reveal: Some(self.target.clone()),
            });
            effects.push(Effect::Sound(SoundCue::Lost));
        } else {
            self.current_row += 1;
            self.buffer.clear();
        }
        effects
    }

    #[must_use]
    pub const fn target(&self) -> &Word {
        &self.target
    }

    #[must_use]
    pub const fn rows(&self) -> &[GuessRow; MAX_ATTEMPTS] {
        &self.rows
    }

    /// 1-based index of the active row
    #[must_use]
    pub const fn row_number(&self) -> usize {
        self.current_row + 1
    }

    /// Letters typed for the active row and not yet committed
    #[must_use]
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status != Status::InProgress
    }

    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.input_locked
    }

    #[must_use]
    pub const fn keys(&self) -> &KeyFeedback {
        &self.keys
    }

    #[must_use]
    pub const fn options(&self) -> SessionOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wordlists::WordList;
    use crate::wordlists::loader::words_from_slice;
    use Feedback::{Found, Matched, Missing};

    const GUESSES: &[&str] = &[
        "slate", "crate", "grate", "irate", "trace", "spoon", "audio", "eerie",
    ];

    fn dictionary() -> WordList {
        WordList::new(words_from_slice(&["crane"]), words_from_slice(GUESSES)).unwrap()
    }

    fn session(dict: &WordList) -> GameSession<'_, WordList> {
        GameSession::with_target(dict, SessionOptions::default(), Word::new("crane").unwrap())
    }

    fn type_word(session: &mut GameSession<'_, WordList>, word: &str) {
        for ch in word.chars() {
            session.handle(Input::Letter(ch));
        }
    }

    fn guess(session: &mut GameSession<'_, WordList>, word: &str) -> Vec<Effect> {
        type_word(session, word);
        session.handle(Input::Enter)
    }

    fn rejected() -> Vec<Effect> {
        vec![Effect::Sound(SoundCue::Error)]
    }

    fn ticket_of(effects: &[Effect]) -> UnlockTicket {
        effects
            .iter()
            .find_map(|effect| match effect {
                Effect::ScheduleUnlock { ticket, .. } => Some(*ticket),
                _ => None,
            })
            .expect("no unlock scheduled")
    }

    #[test]
    fn fresh_session_state() {
        let dict = dictionary();
        let s = session(&dict);
        assert_eq!(s.status(), Status::InProgress);
        assert_eq!(s.row_number(), 1);
        assert!(s.buffer().is_empty());
        assert!(!s.is_locked());
        assert!(s.rows().iter().all(|row| row.committed().is_none()));
    }

    #[test]
    fn letters_fill_the_active_row() {
        let dict = dictionary();
        let mut s = session(&dict);

        let effects = s.handle(Input::Letter('S'));
        assert_eq!(
            effects,
            vec![
                Effect::Sound(SoundCue::Keystroke),
                Effect::Cell {
                    row: 0,
                    col: 0,
                    letter: Some('s'),
                    classification: None
                },
            ]
        );

        type_word(&mut s, "lat");
        let effects = s.handle(Input::Letter('e'));
        assert!(effects.contains(&Effect::flag(0, RowFlag::Full, true)));
        assert!(effects.contains(&Effect::message(MessageCue::Confirm)));
        assert_eq!(s.buffer(), b"slate");
        assert_eq!(s.rows()[0].cells()[4].letter(), Some('e'));
    }

    #[test]
    fn sixth_letter_is_rejected() {
        let dict = dictionary();
        let mut s = session(&dict);
        type_word(&mut s, "slate");

        assert_eq!(s.handle(Input::Letter('x')), rejected());
        assert_eq!(s.buffer(), b"slate");
    }

    #[test]
    fn non_letters_are_rejected() {
        let dict = dictionary();
        let mut s = session(&dict);

        assert_eq!(s.handle(Input::Letter('1')), rejected());
        assert_eq!(s.handle(Input::Letter('é')), rejected());
        assert!(s.buffer().is_empty());
    }

    #[test]
    fn backspace_on_empty_row_is_rejected() {
        let dict = dictionary();
        let mut s = session(&dict);
        assert_eq!(s.handle(Input::Backspace), rejected());
    }

    #[test]
    fn backspace_clears_last_cell_and_unmarks_full() {
        let dict = dictionary();
        let mut s = session(&dict);
        type_word(&mut s, "slate");

        let effects = s.handle(Input::Backspace);
        assert_eq!(
            effects,
            vec![
                Effect::flag(0, RowFlag::Full, false),
                Effect::message(MessageCue::EnterWord),
                Effect::Sound(SoundCue::Delete),
                Effect::Cell {
                    row: 0,
                    col: 4,
                    letter: None,
                    classification: None
                },
            ]
        );
        assert_eq!(s.buffer(), b"slat");
        assert_eq!(s.rows()[0].cells()[4].letter(), None);

        let effects = s.handle(Input::Backspace);
        assert!(!effects.contains(&Effect::message(MessageCue::EnterWord)));
        assert_eq!(s.buffer(), b"sla");
    }

    #[test]
    fn enter_needs_a_full_row() {
        let dict = dictionary();
        let mut s = session(&dict);
        type_word(&mut s, "slat");

        assert_eq!(s.handle(Input::Enter), rejected());
        assert_eq!(s.row_number(), 1);
    }

    #[test]
    fn valid_miss_classifies_and_advances() {
        let dict = dictionary();
        let mut s = session(&dict);

        let effects = guess(&mut s, "slate");

        assert_eq!(
            s.rows()[0].feedback(),
            Some([Missing, Missing, Matched, Missing, Matched])
        );
        assert_eq!(s.rows()[0].committed(), Some(&Word::new("slate").unwrap()));
        assert!(effects.contains(&Effect::Key {
            letter: 'a',
            best: Matched
        }));
        assert!(effects.contains(&Effect::flag(0, RowFlag::Full, false)));
        assert_eq!(s.keys().get(b'e'), Some(Matched));
        assert_eq!(s.keys().get(b's'), Some(Missing));
        assert_eq!(s.row_number(), 2);
        assert!(s.buffer().is_empty());
        assert_eq!(s.status(), Status::InProgress);
    }

    #[test]
    fn exact_guess_wins_on_first_row() {
        let dict = dictionary();
        let mut s = session(&dict);

        let effects = guess(&mut s, "crane");

        assert_eq!(s.status(), Status::Won);
        assert_eq!(s.row_number(), 1);
        assert!(effects.contains(&Effect::flag(0, RowFlag::Winner, true)));
        assert!(effects.contains(&Effect::message(MessageCue::Won)));
        assert!(effects.contains(&Effect::Sound(SoundCue::Won)));
        assert!(s.rows()[1..].iter().all(|row| row.committed().is_none()));

        // Terminal: nothing is accepted anymore
        assert_eq!(s.handle(Input::Letter('a')), rejected());
        assert_eq!(s.handle(Input::Backspace), rejected());
        assert_eq!(s.handle(Input::Enter), rejected());
    }

    #[test]
    fn five_misses_lose_and_reveal_target() {
        let dict = dictionary();
        let mut s = session(&dict);

        for word in ["slate", "crate", "grate", "irate"] {
            guess(&mut s, word);
            assert_eq!(s.status(), Status::InProgress);
        }
        let effects = guess(&mut s, "trace");

        assert_eq!(s.status(), Status::Lost);
        assert_eq!(s.row_number(), MAX_ATTEMPTS);
        assert!(effects.contains(&Effect::Message {
            cue: MessageCue::Lost,
            reveal: Some(Word::new("crane").unwrap()),
        }));
        assert!(effects.contains(&Effect::Sound(SoundCue::Lost)));
        assert!(s.rows().iter().all(|row| row.committed().is_some()));
        assert_eq!(s.handle(Input::Letter('a')), rejected());
    }

    #[test]
    fn unknown_word_locks_until_unlocked() {
        let dict = dictionary();
        let mut s = session(&dict);

        let effects = guess(&mut s, "zzzzz");
        assert!(s.is_locked());
        assert_eq!(
            effects[..3],
            [
                Effect::flag(0, RowFlag::Error, true),
                Effect::Sound(SoundCue::Error),
                Effect::message(MessageCue::NoExist),
            ]
        );
        assert!(matches!(
            effects[3],
            Effect::ScheduleUnlock { after, .. } if after == DEFAULT_UNLOCK_DELAY
        ));

        // Locked: every key is rejected and nothing moves
        assert_eq!(s.handle(Input::Backspace), rejected());
        assert_eq!(s.handle(Input::Letter('a')), rejected());
        assert_eq!(s.handle(Input::Enter), rejected());
        assert_eq!(s.buffer(), b"zzzzz");
        assert_eq!(s.row_number(), 1);
        assert!(s.rows()[0].committed().is_none());

        let effects = s.unlock(ticket_of(&effects));
        assert_eq!(
            effects,
            vec![
                Effect::flag(0, RowFlag::Error, false),
                Effect::message(MessageCue::Confirm),
            ]
        );
        assert!(!s.is_locked());
        assert_eq!(s.buffer(), b"zzzzz");

        // The player edits the same row
        s.handle(Input::Backspace);
        assert_eq!(s.buffer(), b"zzzz");
    }

    #[test]
    fn ticket_only_works_once() {
        let dict = dictionary();
        let mut s = session(&dict);

        let ticket = ticket_of(&guess(&mut s, "zzzzz"));
        assert!(!s.unlock(ticket).is_empty());
        assert!(s.unlock(ticket).is_empty());
    }

    #[test]
    fn earlier_lock_ticket_does_not_release_later_lock() {
        let dict = dictionary();
        let mut s = session(&dict);

        let first = ticket_of(&guess(&mut s, "zzzzz"));
        s.unlock(first);
        let second = ticket_of(&s.handle(Input::Enter));

        assert!(s.unlock(first).is_empty());
        assert!(s.is_locked());
        assert!(!s.unlock(second).is_empty());
    }

    #[test]
    fn reset_restores_initial_state() {
        let dict = dictionary();
        let mut s = session(&dict);
        guess(&mut s, "slate");
        type_word(&mut s, "cr");

        let effects = s.reset();

        assert_eq!(
            effects,
            vec![Effect::BoardCleared, Effect::message(MessageCue::Start)]
        );
        assert_eq!(s.status(), Status::InProgress);
        assert_eq!(s.row_number(), 1);
        assert!(s.buffer().is_empty());
        assert!(s.keys().snapshot().is_empty());
        assert!(s.rows().iter().all(|row| *row == GuessRow::default()));
        assert_eq!(s.target().as_str(), "crane");
    }

    #[test]
    fn reset_after_game_over() {
        let dict = dictionary();
        let mut s = session(&dict);
        guess(&mut s, "crane");
        assert!(s.is_over());

        s.reset_with_target(Word::new("slate").unwrap());
        assert!(!s.is_over());
        guess(&mut s, "slate");
        assert_eq!(s.status(), Status::Won);
    }

    #[test]
    fn stale_ticket_after_reset_is_harmless() {
        let dict = dictionary();
        let mut s = session(&dict);
        let ticket = ticket_of(&guess(&mut s, "zzzzz"));

        s.reset();
        assert!(!s.is_locked());

        // Lock the new game too, then fire the pre-reset timer
        let fresh = ticket_of(&guess(&mut s, "zzzzz"));
        assert!(s.unlock(ticket).is_empty());
        assert!(s.is_locked());
        assert!(!s.unlock(fresh).is_empty());
    }

    #[test]
    fn strict_rule_is_applied_when_configured() {
        let dict = dictionary();
        let options = SessionOptions {
            rule: ClassificationRule::Strict,
            ..SessionOptions::default()
        };
        let mut s = GameSession::with_target(&dict, options, Word::new("crane").unwrap());

        guess(&mut s, "eerie");
        assert_eq!(
            s.rows()[0].feedback(),
            Some([Missing, Missing, Found, Missing, Matched])
        );
        assert_eq!(s.keys().get(b'e'), Some(Matched));
    }

    #[test]
    fn key_feedback_keeps_best_across_rows() {
        let dict = dictionary();
        let mut s = session(&dict);

        guess(&mut s, "trace"); // a Matched, c Found
        guess(&mut s, "audio"); // a stays Matched
        guess(&mut s, "crate"); // c Matched

        assert_eq!(s.keys().get(b'c'), Some(Matched));
        assert_eq!(s.keys().get(b'e'), Some(Matched));
        assert_eq!(s.keys().get(b't'), Some(Missing));
        assert_eq!(s.keys().get(b'a'), Some(Matched));
    }
}
