//! Main controller coordinating the state machine, menus and rounds
//!
//! The controller is the central brain that:
//! - Processes knob and button events
//! - Updates the state machine
//! - Hands rounds to the dealer and takes back their results
//! - Decides what the display shows
//!
//! It owns no hardware. The firmware's dealer task executes the
//! [`RoundRequest`]s and reports back through [`Controller::round_finished`].

use core::fmt::Write;

use heapless::String;

use crate::config::MachineConfig;
use crate::game::{DealPlan, Round};
use crate::input::InputEvent;
use crate::menu;
use crate::scheduler::RoundReport;
use crate::state::{ErrorKind, Event, State};

/// Text buffer sized for the display plus slack
pub type DisplayText = String<8>;

/// A round the dealer should run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RoundRequest {
    /// Sequence number, echoed back with the result
    pub id: u16,
    /// Round to deal
    pub round: Round,
    /// Players at the table (poker only)
    pub players: u8,
}

impl RoundRequest {
    /// Check if this is the first round of a new game
    pub fn starts_game(&self) -> bool {
        matches!(self.round, Round::War | Round::HoleCards)
    }

    /// Expand into a deal plan
    pub fn plan(&self, config: &MachineConfig) -> DealPlan {
        DealPlan::for_round(self.round, self.players, config)
    }
}

/// Controller state for coordinating subsystems
pub struct Controller {
    /// Machine configuration
    config: MachineConfig,
    /// Current machine state
    state: State,
    /// Last raw knob reading
    knob: u16,
    /// Show the menu prompt until the knob moves
    prompt: bool,
    /// Players chosen for the current poker hand
    players: u8,
    /// Round waiting to be picked up by the dealer
    pending: Option<RoundRequest>,
    /// Id of the round the dealer is running
    in_flight: Option<u16>,
    /// Id for the next round request
    next_id: u16,
    /// Result of the last completed round
    last_report: Option<RoundReport>,
}

impl Controller {
    /// Create a new controller
    pub fn new(config: MachineConfig) -> Self {
        Self {
            config,
            state: State::Boot,
            knob: 0,
            prompt: true,
            players: config.poker.min_players,
            pending: None,
            in_flight: None,
            next_id: 0,
            last_report: None,
        }
    }

    /// Complete boot sequence
    pub fn boot_complete(&mut self) {
        self.transition(Event::BootComplete);
    }

    /// Report a fault found outside a round (boot homing, display, config)
    pub fn fault(&mut self, kind: ErrorKind) -> Event {
        let event = Event::ErrorDetected(kind);
        self.transition(event);
        event
    }

    /// Get current state
    pub fn state(&self) -> State {
        self.state
    }

    /// Result of the last completed round
    pub fn last_report(&self) -> Option<RoundReport> {
        self.last_report
    }

    /// Process an input event
    pub fn process_input(&mut self, input: InputEvent) -> Option<Event> {
        match input {
            InputEvent::Knob(raw) => self.handle_knob(raw),
            InputEvent::Click => self.handle_button_click(),
            InputEvent::LongPress => self.handle_button_long_press(),
        }
    }

    /// Handle a new knob reading
    fn handle_knob(&mut self, raw: u16) -> Option<Event> {
        self.knob = raw;
        if matches!(self.state, State::SelectGame | State::SelectPlayers) {
            self.prompt = false;
        }
        None
    }

    /// Handle button click
    fn handle_button_click(&mut self) -> Option<Event> {
        let event = match self.state {
            State::SelectGame => {
                Event::ChooseGame(menu::game_for(self.knob, &self.config.potentiometer))
            }
            State::SelectPlayers => {
                self.players =
                    menu::players_for(self.knob, &self.config.potentiometer, &self.config.poker);
                Event::ChoosePlayers
            }
            State::AwaitingRound(_) => Event::Continue,
            State::Error(_) => Event::AcknowledgeError,
            _ => return None,
        };
        self.transition(event);
        Some(event)
    }

    /// Handle button long press
    fn handle_button_long_press(&mut self) -> Option<Event> {
        let event = match self.state {
            State::SelectPlayers => Event::Back,
            State::AwaitingRound(_) => Event::Abort,
            State::Error(_) => Event::AcknowledgeError,
            _ => return None,
        };
        self.transition(event);
        Some(event)
    }

    /// Take the round the dealer should run next, if any
    pub fn take_round_request(&mut self) -> Option<RoundRequest> {
        let request = self.pending.take()?;
        self.in_flight = Some(request.id);
        Some(request)
    }

    /// Record the result of a round handed out by [`take_round_request`]
    ///
    /// Only the result of the round in flight counts. A round that was
    /// still running when a fault moved the UI to `Error` reports late.
    /// Its result is dropped, even if a newer round has started since.
    ///
    /// [`take_round_request`]: Controller::take_round_request
    pub fn round_finished(
        &mut self,
        id: u16,
        result: Result<RoundReport, ErrorKind>,
    ) -> Option<Event> {
        if self.in_flight != Some(id) {
            return None;
        }
        self.in_flight = None;
        if !self.state.is_dealing() {
            return None;
        }

        let event = match result {
            Ok(report) => {
                self.last_report = Some(report);
                Event::RoundFinished
            }
            Err(kind) => Event::ErrorDetected(kind),
        };
        self.transition(event);
        Some(event)
    }

    /// Text for the 7-segment display in the current state
    pub fn display_text(&self) -> DisplayText {
        let mut text = DisplayText::new();
        // Every label fits the buffer, so the writes below cannot fail
        let label = match self.state {
            State::Boot => "boot",
            State::SelectGame if self.prompt => "ga",
            State::SelectGame => menu::game_for(self.knob, &self.config.potentiometer).label(),
            State::SelectPlayers if self.prompt => "pl",
            State::SelectPlayers => {
                let players =
                    menu::players_for(self.knob, &self.config.potentiometer, &self.config.poker);
                let _ = write!(text, "{}", players);
                return text;
            }
            State::Dealing(round) | State::AwaitingRound(round) => round.label(),
            State::Error(kind) => {
                let _ = write!(text, "Er{:>2}", kind.code());
                return text;
            }
        };
        let _ = text.push_str(label);
        text
    }

    /// Perform state transition
    fn transition(&mut self, event: Event) {
        let next = self.state.transition(event);
        if next == self.state {
            return;
        }
        self.state = next;

        match next {
            State::SelectGame | State::SelectPlayers => self.prompt = true,
            State::Dealing(round) => {
                self.pending = Some(RoundRequest {
                    id: self.next_id,
                    round,
                    players: self.players,
                });
                self.next_id = self.next_id.wrapping_add(1);
            }
            State::Error(_) => self.pending = None,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Game;

    fn booted() -> Controller {
        let mut ctrl = Controller::new(MachineConfig::default());
        ctrl.boot_complete();
        ctrl
    }

    fn finish_round(ctrl: &mut Controller, id: u16) -> Option<Event> {
        ctrl.round_finished(id, Ok(RoundReport { dealt: 1, skipped: 0 }))
    }

    #[test]
    fn test_controller_boot() {
        let mut ctrl = Controller::new(MachineConfig::default());
        assert_eq!(ctrl.state(), State::Boot);
        assert_eq!(ctrl.display_text().as_str(), "boot");

        ctrl.boot_complete();
        assert_eq!(ctrl.state(), State::SelectGame);
        assert_eq!(ctrl.display_text().as_str(), "ga");
    }

    #[test]
    fn test_knob_highlights_game() {
        let mut ctrl = booted();
        ctrl.process_input(InputEvent::Knob(100));
        assert_eq!(ctrl.display_text().as_str(), "po");
        ctrl.process_input(InputEvent::Knob(3000));
        assert_eq!(ctrl.display_text().as_str(), "UUar");
    }

    #[test]
    fn test_war_game() {
        let mut ctrl = booted();
        ctrl.process_input(InputEvent::Knob(4000));
        assert_eq!(
            ctrl.process_input(InputEvent::Click),
            Some(Event::ChooseGame(Game::War))
        );
        assert_eq!(ctrl.state(), State::Dealing(Round::War));

        let request = ctrl.take_round_request().unwrap();
        assert_eq!(request.round, Round::War);
        assert!(request.starts_game());
        assert_eq!(ctrl.take_round_request(), None);

        // Input is ignored while dealing
        assert_eq!(ctrl.process_input(InputEvent::Click), None);
        assert_eq!(ctrl.process_input(InputEvent::LongPress), None);

        assert_eq!(finish_round(&mut ctrl, request.id), Some(Event::RoundFinished));
        assert_eq!(ctrl.state(), State::SelectGame);
        assert_eq!(ctrl.display_text().as_str(), "ga");
    }

    #[test]
    fn test_poker_hand() {
        let mut ctrl = booted();
        ctrl.process_input(InputEvent::Knob(0));
        ctrl.process_input(InputEvent::Click);
        assert_eq!(ctrl.state(), State::SelectPlayers);
        assert_eq!(ctrl.display_text().as_str(), "pl");

        // 2048..3071 selects four players
        ctrl.process_input(InputEvent::Knob(2500));
        assert_eq!(ctrl.display_text().as_str(), "4");
        ctrl.process_input(InputEvent::Click);

        let request = ctrl.take_round_request().unwrap();
        assert_eq!(
            request,
            RoundRequest {
                id: 0,
                round: Round::HoleCards,
                players: 4
            }
        );
        assert_eq!(ctrl.display_text().as_str(), "deal");

        let mut id = request.id;
        for (round, label) in [(Round::Flop, "flop"), (Round::Turn, "turn"), (Round::River, "ri")] {
            finish_round(&mut ctrl, id);
            assert_eq!(ctrl.state(), State::AwaitingRound(round));
            assert_eq!(ctrl.display_text().as_str(), label);
            assert_eq!(ctrl.take_round_request(), None);

            ctrl.process_input(InputEvent::Click);
            let request = ctrl.take_round_request().unwrap();
            assert_eq!(request.round, round);
            assert_eq!(request.players, 4);
            assert_eq!(request.id, id + 1);
            assert!(!request.starts_game());
            id = request.id;
        }

        finish_round(&mut ctrl, id);
        assert_eq!(ctrl.state(), State::SelectGame);
    }

    #[test]
    fn test_long_press_abort() {
        let mut ctrl = booted();
        ctrl.process_input(InputEvent::Click);
        ctrl.process_input(InputEvent::Click);
        let request = ctrl.take_round_request().unwrap();
        finish_round(&mut ctrl, request.id);
        assert_eq!(ctrl.state(), State::AwaitingRound(Round::Flop));

        ctrl.process_input(InputEvent::LongPress);
        assert_eq!(ctrl.state(), State::SelectGame);
        assert_eq!(ctrl.take_round_request(), None);
    }

    #[test]
    fn test_long_press_back_from_players() {
        let mut ctrl = booted();
        ctrl.process_input(InputEvent::Click);
        assert_eq!(ctrl.state(), State::SelectPlayers);
        assert_eq!(ctrl.process_input(InputEvent::LongPress), Some(Event::Back));
        assert_eq!(ctrl.state(), State::SelectGame);
    }

    #[test]
    fn test_round_error_and_acknowledge() {
        let mut ctrl = booted();
        ctrl.process_input(InputEvent::Knob(4095));
        ctrl.process_input(InputEvent::Click);
        let request = ctrl.take_round_request().unwrap();

        let event = ctrl.round_finished(request.id, Err(ErrorKind::OutOfCards));
        assert_eq!(event, Some(Event::ErrorDetected(ErrorKind::OutOfCards)));
        assert_eq!(ctrl.state(), State::Error(ErrorKind::OutOfCards));
        assert_eq!(ctrl.display_text().as_str(), "Er 4");

        ctrl.process_input(InputEvent::Click);
        assert_eq!(ctrl.state(), State::SelectGame);
    }

    #[test]
    fn test_boot_fault() {
        let mut ctrl = Controller::new(MachineConfig::default());
        ctrl.fault(ErrorKind::HomingFailed);
        assert_eq!(ctrl.state(), State::Error(ErrorKind::HomingFailed));
        assert_eq!(ctrl.display_text().as_str(), "Er 1");
        ctrl.process_input(InputEvent::LongPress);
        assert_eq!(ctrl.state(), State::SelectGame);
    }

    #[test]
    fn test_last_report_kept() {
        let mut ctrl = booted();
        ctrl.process_input(InputEvent::Knob(4095));
        ctrl.process_input(InputEvent::Click);
        let request = ctrl.take_round_request().unwrap();
        ctrl.round_finished(request.id, Ok(RoundReport { dealt: 52, skipped: 0 }));
        assert_eq!(ctrl.last_report(), Some(RoundReport { dealt: 52, skipped: 0 }));
    }

    #[test]
    fn test_late_result_after_fault_ignored() {
        let mut ctrl = booted();
        ctrl.process_input(InputEvent::Knob(4095));
        ctrl.process_input(InputEvent::Click);
        let first = ctrl.take_round_request().unwrap();

        // Display dies mid-round, user acknowledges and starts another
        ctrl.fault(ErrorKind::DisplayFault);
        ctrl.process_input(InputEvent::Click);
        assert_eq!(ctrl.state(), State::SelectGame);
        ctrl.process_input(InputEvent::Click);
        let second = ctrl.take_round_request().unwrap();
        assert_ne!(first.id, second.id);

        assert_eq!(finish_round(&mut ctrl, first.id), None);
        assert_eq!(ctrl.state(), State::Dealing(Round::War));
        assert_eq!(ctrl.last_report(), None);

        assert_eq!(finish_round(&mut ctrl, second.id), Some(Event::RoundFinished));
        assert_eq!(ctrl.state(), State::SelectGame);
    }

    #[test]
    fn test_result_while_in_error_ignored() {
        let mut ctrl = booted();
        ctrl.process_input(InputEvent::Knob(4095));
        ctrl.process_input(InputEvent::Click);
        let request = ctrl.take_round_request().unwrap();

        ctrl.fault(ErrorKind::DisplayFault);
        assert_eq!(
            ctrl.round_finished(request.id, Err(ErrorKind::OutOfCards)),
            None
        );
        assert_eq!(ctrl.state(), State::Error(ErrorKind::DisplayFault));

        // A repeated result for the same round is stale too
        ctrl.process_input(InputEvent::Click);
        assert_eq!(finish_round(&mut ctrl, request.id), None);
        assert_eq!(ctrl.state(), State::SelectGame);
    }
}
