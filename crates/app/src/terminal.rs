//! Line-based drill host over any reader/writer pair.

use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::Context;
use drill_core::model::{Difficulty, Operation};
use drill_core::{DrillConfig, Phase, SET_LENGTH, SessionError, SlotStatus};
use services::messages;
use services::{
    AppState, Clock, DrillEventSink, DrillService, DrillServiceError, Screen, TracingSink,
};

/// What the user chose on the results screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ResultsChoice {
    Restart,
    Back,
    Quit,
}

pub struct TerminalHost<R, W> {
    input: R,
    output: W,
    app: AppState,
    clock: Clock,
    seed: Option<u64>,
    sets_started: u64,
}

impl<R: BufRead, W: Write> TerminalHost<R, W> {
    #[must_use]
    pub fn new(input: R, output: W, app: AppState, clock: Clock, seed: Option<u64>) -> Self {
        Self {
            input,
            output,
            app,
            clock,
            seed,
            sets_started: 0,
        }
    }

    #[must_use]
    pub fn app(&self) -> &AppState {
        &self.app
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.output
    }

    /// Run until the user quits or input ends.
    ///
    /// `preset` skips the selection prompt for the first set.
    ///
    /// # Errors
    ///
    /// Returns I/O errors from the terminal and unexpected drill failures.
    pub fn run(&mut self, mut preset: Option<DrillConfig>) -> anyhow::Result<()> {
        writeln!(self.output, "{}", messages::APP_TITLE)?;
        loop {
            match self.app.screen() {
                Screen::SignIn => {
                    anyhow::bail!("terminal host needs a signed-in or guest user");
                }
                Screen::Selection => {
                    let config = match preset.take() {
                        Some(config) => config,
                        None => match self.prompt_selection()? {
                            Some(config) => config,
                            None => return Ok(()),
                        },
                    };
                    self.app.select(config)?;
                }
                Screen::Drill => {
                    let config = self.app.selection().context("drill screen without selection")?;
                    if !self.play_set(config)? {
                        return Ok(());
                    }
                }
                Screen::Results => self.app.back_to_selection()?,
            }
        }
    }

    fn start_service(&mut self, config: DrillConfig) -> anyhow::Result<DrillService> {
        let service = match self.seed {
            Some(seed) => DrillService::start_seeded(
                config,
                self.clock,
                seed.wrapping_add(self.sets_started),
            )?,
            None => DrillService::start(config, self.clock)?,
        };
        self.sets_started += 1;
        Ok(service.with_sink(Arc::new(TracingSink) as Arc<dyn DrillEventSink>))
    }

    /// Returns `false` when the user quit.
    fn play_set(&mut self, config: DrillConfig) -> anyhow::Result<bool> {
        let mut drill = self.start_service(config)?;
        loop {
            match drill.state().phase() {
                Phase::Answering => {
                    self.render_question(&drill)?;
                    let Some(line) = self.read_line()? else {
                        return Ok(false);
                    };
                    let Ok(choice) = line.parse::<u32>() else {
                        writeln!(self.output, "{}", messages::CHOOSE_ANSWER)?;
                        continue;
                    };
                    match drill.submit_answer(choice) {
                        Ok(outcome) => outcome.events.iter().for_each(|e| self.app.apply_event(e)),
                        Err(DrillServiceError::Session(SessionError::NotAChoice(_))) => {
                            writeln!(self.output, "{}", messages::CHOOSE_ANSWER)?;
                        }
                        Err(err) if err.is_ignorable() => {}
                        Err(err) => return Err(err.into()),
                    }
                }
                Phase::Feedback => {
                    self.render_feedback(&drill)?;
                    if self.read_line()?.is_none() {
                        return Ok(false);
                    }
                    let outcome = drill.advance()?;
                    outcome.events.iter().for_each(|e| self.app.apply_event(e));
                }
                Phase::SetComplete => {
                    self.render_results(&drill)?;
                    match self.prompt_results()? {
                        ResultsChoice::Restart => {
                            self.app.restart_set()?;
                            drill.restart()?;
                        }
                        ResultsChoice::Back => {
                            self.app.back_to_selection()?;
                            return Ok(true);
                        }
                        ResultsChoice::Quit => return Ok(false),
                    }
                }
            }
        }
    }

    fn prompt_selection(&mut self) -> anyhow::Result<Option<DrillConfig>> {
        let difficulty = loop {
            for d in Difficulty::ALL {
                writeln!(self.output, "  {}) {}", d.tier(), messages::difficulty_label(d))?;
            }
            write!(self.output, "> ")?;
            self.output.flush()?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            if line == "q" {
                return Ok(None);
            }
            if let Ok(d) = line.parse::<Difficulty>() {
                break d;
            }
        };
        let operation = loop {
            writeln!(
                self.output,
                "  +) {}  -) {}",
                messages::operation_heading(Operation::Addition),
                messages::operation_heading(Operation::Subtraction)
            )?;
            write!(self.output, "> ")?;
            self.output.flush()?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            if line.is_empty() {
                break Operation::Addition;
            }
            if let Ok(op) = line.parse::<Operation>() {
                break op;
            }
        };
        Ok(Some(DrillConfig::new(difficulty, operation)))
    }

    fn prompt_results(&mut self) -> anyhow::Result<ResultsChoice> {
        loop {
            writeln!(
                self.output,
                "r) {}  b) {}  q) quit",
                messages::RESTART_SET,
                messages::BACK_TO_SELECTION
            )?;
            let Some(line) = self.read_line()? else {
                return Ok(ResultsChoice::Quit);
            };
            match line.as_str() {
                "r" => return Ok(ResultsChoice::Restart),
                "b" => return Ok(ResultsChoice::Back),
                "q" => return Ok(ResultsChoice::Quit),
                _ => {}
            }
        }
    }

    fn render_question(&mut self, drill: &DrillService) -> anyhow::Result<()> {
        let state = drill.state();
        writeln!(self.output)?;
        writeln!(
            self.output,
            "{}  {}  {}: {}",
            messages::question_counter(state.question_index(), SET_LENGTH),
            messages::correct_counter(state.correct_count()),
            messages::SOLVED_TODAY,
            self.app.problems_solved()
        )?;
        writeln!(self.output, "{}", progress_strip(&state.progress()))?;
        writeln!(self.output, "{}", messages::operation_heading(state.config().operation))?;
        writeln!(self.output, "{}", state.current_problem())?;
        let choices: Vec<String> = state.choices().iter().map(|c| c.to_string()).collect();
        writeln!(self.output, "{} [{}]", messages::CHOOSE_ANSWER, choices.join(" / "))?;
        write!(self.output, "> ")?;
        self.output.flush()?;
        Ok(())
    }

    fn render_feedback(&mut self, drill: &DrillService) -> anyhow::Result<()> {
        let state = drill.state();
        if let Some(record) = state.last_answer() {
            writeln!(self.output, "{}", messages::your_answer(record))?;
            writeln!(self.output, "{}", messages::feedback(record))?;
        }
        writeln!(self.output, "[Enter] {}", messages::next_button(state.is_last_question()))?;
        self.output.flush()?;
        Ok(())
    }

    fn render_results(&mut self, drill: &DrillService) -> anyhow::Result<()> {
        let state = drill.state();
        let summary = state.summary().context("results requested before set completion")?;
        writeln!(self.output)?;
        writeln!(
            self.output,
            "{} {}",
            messages::band_icon(summary.band()),
            messages::RESULTS_TITLE
        )?;
        writeln!(self.output, "{}", messages::band_message(summary.band()))?;
        writeln!(self.output, "{}", messages::score_line(&summary))?;
        writeln!(self.output, "{}", progress_strip(&state.progress()))?;
        Ok(())
    }

    fn read_line(&mut self) -> anyhow::Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read from terminal")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

fn progress_strip(progress: &[SlotStatus]) -> String {
    progress
        .iter()
        .enumerate()
        .map(|(slot, status)| match status {
            SlotStatus::Correct => "○".to_string(),
            SlotStatus::Incorrect => "×".to_string(),
            SlotStatus::Current => format!("[{}]", slot + 1),
            SlotStatus::Pending => (slot + 1).to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use services::AuthUser;
    use services::clock::fixed_now;
    use std::fmt::Write as _;
    use std::io::Cursor;

    fn guest() -> AppState {
        let mut app = AppState::new();
        app.sign_in(AuthUser::Guest);
        app
    }

    /// Script answering every question of the first seeded set.
    fn perfect_script(config: DrillConfig, seed: u64) -> String {
        let mut mirror = DrillService::start_seeded(config, Clock::Fixed(fixed_now()), seed).unwrap();
        let mut script = String::new();
        for _ in 0..SET_LENGTH {
            let answer = mirror.state().current_problem().result();
            writeln!(script, "{answer}").unwrap();
            script.push('\n');
            mirror.submit_answer(answer).unwrap();
            mirror.advance().unwrap();
        }
        script
    }

    #[test]
    fn perfect_set_reaches_results() {
        let config = DrillConfig::new(Difficulty::Easy, Operation::Addition);
        let mut script = perfect_script(config, 5);
        script.push_str("q\n");

        let mut host = TerminalHost::new(
            Cursor::new(script),
            Vec::new(),
            guest(),
            Clock::Fixed(fixed_now()),
            Some(5),
        );
        host.run(Some(config)).unwrap();

        assert_eq!(host.app().problems_solved(), 10);
        assert_eq!(host.app().screen(), Screen::Results);
        let output = String::from_utf8(host.into_output()).unwrap();
        assert!(output.contains("10 / 10（正解率: 100%）"));
        assert!(output.contains("パーフェクト！素晴らしいです！"));
        assert!(output.contains("結果を見る"));
    }

    #[test]
    fn invalid_answers_are_reprompted() {
        let config = DrillConfig::new(Difficulty::Hard, Operation::Subtraction);
        let mut host = TerminalHost::new(
            Cursor::new("abc\n99\n"),
            Vec::new(),
            guest(),
            Clock::Fixed(fixed_now()),
            Some(1),
        );
        host.run(Some(config)).unwrap();

        let output = String::from_utf8(host.into_output()).unwrap();
        assert_eq!(output.matches(messages::CHOOSE_ANSWER).count(), 5);
        assert_eq!(host_solved(&output), 0);
    }

    fn host_solved(output: &str) -> usize {
        output.matches("正解です！").count()
    }

    #[test]
    fn selection_prompt_parses_difficulty_and_operation() {
        let mut host = TerminalHost::new(
            Cursor::new("9\n2\n-\n"),
            Vec::new(),
            guest(),
            Clock::Fixed(fixed_now()),
            Some(3),
        );
        host.run(None).unwrap();

        assert_eq!(
            host.app().selection(),
            Some(DrillConfig::new(Difficulty::Medium, Operation::Subtraction))
        );
        let output = String::from_utf8(host.into_output()).unwrap();
        assert!(output.contains(messages::operation_heading(Operation::Subtraction)));
    }

    #[test]
    fn progress_strip_marks_slots() {
        let strip = progress_strip(&[
            SlotStatus::Correct,
            SlotStatus::Incorrect,
            SlotStatus::Current,
            SlotStatus::Pending,
        ]);
        assert_eq!(strip, "○ × [3] 4");
    }
}
