//! Interactive focus day. Commands are read line by line from stdin while
//! timer events are printed as they arrive.

use std::error::Error;
use std::fmt::Display;
use std::io::{IsTerminal, Write};

use clap::Args;
use focus_reminder_core::storage::NotificationsConfig;
use focus_reminder_core::timer::{format_clock, status_line, title_line};
use focus_reminder_core::{
    Config, CsvActivityLog, DayLifecycle, DayOutcome, DayPhase, DaySnapshot, Event,
    FocusController, GoalOutcome, MemoryActivityLog, SoundCue,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::debug;

const SETUP_USAGE: &str = "setup <intention> | <goal>, <goal> | <minutes>";

const HELP: &str = "\
commands:
  start                         start the timer
  pause [reason]                pause, optionally recording why
  resume                        resume after a pause
  done <goal> [| remarks]       mark a goal as completed
  add <goal>                    add a goal to today's list
  status                        show intention, goals and timer
  sound                         show the concentration sound
  finish <rating> [comments]    end the day (rating 1-10)
  restart <rating> [comments]   end the day and set up a new one
  setup <intention> | <goal>, <goal> | <minutes>
  quit                          leave without ending the day";

#[derive(Args)]
pub struct RunArgs {
    /// What today is about
    #[arg(long)]
    intention: String,
    /// A goal for today (repeatable)
    #[arg(long = "goal")]
    goals: Vec<String>,
    /// Full pomodoro length in minutes [default: schedule.pomodoro_minutes]
    #[arg(long, allow_negative_numbers = true)]
    minutes: Option<i64>,
    /// Print events as JSON lines
    #[arg(long)]
    json: bool,
    /// Keep the activity log in memory only
    #[arg(long)]
    no_log: bool,
}

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Start,
    Pause(Option<String>),
    Resume,
    Done { goal: String, remarks: Option<String> },
    Add(String),
    Status,
    Sound,
    Finish { rating: u8, comments: String, restart: bool },
    Setup { intention: String, goals: Vec<String>, minutes: Option<i64> },
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let name = word.to_ascii_lowercase();

        let command = match name.as_str() {
            "start" => Self::Start,
            "pause" => Self::Pause(non_blank(rest)),
            "resume" => Self::Resume,
            "done" => {
                let (goal, remarks) = match rest.split_once('|') {
                    Some((goal, remarks)) => (goal.trim(), non_blank(remarks)),
                    None => (rest, None),
                };
                if goal.is_empty() {
                    return Err("usage: done <goal> [| remarks]".into());
                }
                Self::Done {
                    goal: goal.to_string(),
                    remarks,
                }
            }
            "add" => {
                if rest.is_empty() {
                    return Err("usage: add <goal>".into());
                }
                Self::Add(rest.to_string())
            }
            "status" => Self::Status,
            "sound" => Self::Sound,
            "finish" | "restart" => {
                let (rating, comments) = match rest.split_once(char::is_whitespace) {
                    Some((rating, comments)) => (rating, comments.trim()),
                    None => (rest, ""),
                };
                let rating = rating
                    .parse::<u8>()
                    .map_err(|_| format!("usage: {name} <rating 1-10> [comments]"))?;
                Self::Finish {
                    rating,
                    comments: comments.to_string(),
                    restart: name == "restart",
                }
            }
            "setup" => {
                let mut parts = rest.split('|');
                let intention = parts.next().unwrap_or_default().trim().to_string();
                let goals = parts
                    .next()
                    .map(|goals| goals.split(',').map(str::to_string).collect())
                    .unwrap_or_default();
                let minutes = match parts.next().map(str::trim).filter(|m| !m.is_empty()) {
                    Some(minutes) => Some(
                        minutes
                            .parse::<i64>()
                            .map_err(|_| format!("usage: {SETUP_USAGE}"))?,
                    ),
                    None => None,
                };
                Self::Setup {
                    intention,
                    goals,
                    minutes,
                }
            }
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(format!("unknown command '{other}', try `help`")),
        };
        Ok(Some(command))
    }
}

fn non_blank(text: &str) -> Option<String> {
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

/// Terminal rendering of events and command feedback.
struct Presenter {
    json: bool,
    /// Redraw the countdown in place on every tick.
    live: bool,
    notifications: NotificationsConfig,
    /// A countdown line without a trailing newline is on screen.
    ticking: bool,
}

impl Presenter {
    fn drain(&mut self, events: &mut UnboundedReceiver<Event>) -> Result<(), Box<dyn Error>> {
        while let Ok(event) = events.try_recv() {
            self.event(&event)?;
        }
        Ok(())
    }

    fn event(&mut self, event: &Event) -> Result<(), Box<dyn Error>> {
        if self.json {
            println!("{}", serde_json::to_string(event)?);
            return Ok(());
        }

        if let Event::Tick {
            seconds_remaining,
            interval,
            total_pomodoros,
        } = event
        {
            if self.live {
                print!(
                    "\r{}   {}",
                    status_line(*seconds_remaining, *interval),
                    title_line(*seconds_remaining, *total_pomodoros)
                );
                std::io::stdout().flush()?;
                self.ticking = true;
            }
            return Ok(());
        }

        self.end_live_line();
        match event {
            Event::DayStarted {
                intention,
                goals,
                pomodoro_secs,
                ..
            } => {
                println!("Day started: {intention}");
                for goal in goals {
                    println!("  [ ] {goal}");
                }
                println!("Pomodoro: {} (type `start` to begin)", format_clock(*pomodoro_secs));
            }
            Event::TimerStarted {
                seconds_remaining,
                interval,
                ..
            } => println!("Timer started at {}", status_line(*seconds_remaining, *interval)),
            Event::TimerPaused {
                reason,
                seconds_remaining,
                ..
            } => match reason {
                Some(reason) => println!("Paused at {} ({reason})", format_clock(*seconds_remaining)),
                None => println!("Paused at {}", format_clock(*seconds_remaining)),
            },
            Event::TimerResumed {
                seconds_remaining, ..
            } => println!("Resumed at {}", format_clock(*seconds_remaining)),
            Event::IntervalEnded { cue, next, .. } => {
                if self.notifications.bell {
                    print!("\x07");
                }
                let ended = match cue {
                    SoundCue::WorkEnd => "Work interval",
                    SoundCue::BreakEnd => "Break",
                };
                println!(
                    "{ended} over, next: {} [{}]",
                    next.label(),
                    self.notifications.sound_for(*cue)
                );
            }
            Event::PomodoroCompleted {
                number,
                pomodoro_secs,
                break_secs,
                ..
            } => println!(
                "Pomodoro #{number} completed (pomodoro {}, break {})",
                format_clock(*pomodoro_secs),
                format_clock(*break_secs)
            ),
            Event::GoalCompleted { goal, .. } => println!("Goal completed: {goal}"),
            Event::GoalAdded { goal, .. } => println!("Goal added: {goal}"),
            Event::DayGoalsExhausted { .. } => println!(
                "All goals completed. Is the day over? `finish <rating> [comments]` or `restart <rating> [comments]`"
            ),
            Event::DayFinished { rating, restart, .. } => {
                if *restart {
                    println!("Day closed with rating {rating}. Next: `{SETUP_USAGE}`");
                } else {
                    println!("Day finished with rating {rating}");
                }
            }
            Event::LogWriteFailed { kind, message, .. } => {
                eprintln!("warning: could not record {}: {message}", kind.as_str());
            }
            Event::StateSnapshot(snapshot) => print_snapshot(snapshot),
            Event::Tick { .. } => {}
        }
        Ok(())
    }

    fn sound(&mut self) {
        let file = self.notifications.concentration_sound.clone();
        if self.json {
            println!(
                "{}",
                serde_json::json!({ "type": "ConcentrationSound", "file": file })
            );
        } else {
            self.end_live_line();
            println!("Concentration sound: {file}");
        }
    }

    fn notice(&mut self, message: &str) {
        self.end_live_line();
        eprintln!("{message}");
    }

    fn error(&mut self, err: &dyn Display) {
        self.notice(&format!("error: {err}"));
    }

    fn end_live_line(&mut self) {
        if self.ticking {
            println!();
            self.ticking = false;
        }
    }
}

fn print_snapshot(snapshot: &DaySnapshot) {
    if snapshot.phase == DayPhase::Setup {
        println!("No active day. `{SETUP_USAGE}`");
        return;
    }
    println!("Intention: {}", snapshot.intention);
    for goal in &snapshot.goals {
        let mark = if goal.completed { "x" } else { " " };
        println!("  [{mark}] {}", goal.goal);
    }
    if let (Some(secs), Some(interval)) = (snapshot.seconds_remaining, snapshot.interval) {
        let state = if snapshot.paused {
            "paused"
        } else if snapshot.running {
            "running"
        } else {
            "stopped"
        };
        println!("{}   {}   {state}", status_line(secs, interval), title_line(secs, snapshot.total_pomodoros));
    }
    println!("Pomodoros completed: {}", snapshot.total_pomodoros);
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn Error>> {
    let config = Config::load_or_default();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(run_day(args, config));
    // A stdin read may still be parked on the blocking pool.
    runtime.shutdown_background();
    result
}

async fn run_day(args: RunArgs, config: Config) -> Result<(), Box<dyn Error>> {
    let day = if args.no_log {
        DayLifecycle::new(MemoryActivityLog::new())
    } else {
        let dir = config.log_dir()?;
        debug!(dir = %dir.display(), "activity log directory");
        DayLifecycle::new(CsvActivityLog::new(dir))
    };
    let default_minutes = i64::from(config.schedule.pomodoro_minutes);

    let (mut controller, mut events) = FocusController::new(day);
    controller
        .start_day(&args.intention, &args.goals, args.minutes.unwrap_or(default_minutes))
        .await?;

    let mut presenter = Presenter {
        json: args.json,
        live: !args.json && std::io::stdout().is_terminal(),
        notifications: config.notifications,
        ticking: false,
    };
    presenter.drain(&mut events)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            Some(event) = events.recv() => presenter.event(&event)?,
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("stdin closed");
                    break;
                };
                let flow = match Command::parse(&line) {
                    Ok(Some(command)) => {
                        execute(&mut controller, command, &mut presenter, default_minutes).await?
                    }
                    Ok(None) => Flow::Continue,
                    Err(usage) => {
                        presenter.notice(&usage);
                        Flow::Continue
                    }
                };
                presenter.drain(&mut events)?;
                if flow == Flow::Stop {
                    break;
                }
            }
        }
    }

    controller.shutdown().await;
    presenter.drain(&mut events)?;
    presenter.end_live_line();
    Ok(())
}

async fn execute(
    controller: &mut FocusController,
    command: Command,
    presenter: &mut Presenter,
    default_minutes: i64,
) -> Result<Flow, Box<dyn Error>> {
    match command {
        Command::Start => {
            if !controller.start().await {
                presenter.notice("timer is already running or no day is active");
            }
        }
        Command::Pause(reason) => {
            if !controller.pause(reason.as_deref()).await {
                presenter.notice("timer is not running");
            }
        }
        Command::Resume => {
            if !controller.resume().await {
                presenter.notice("timer is not paused");
            }
        }
        Command::Done { goal, remarks } => {
            match controller.complete_goal(&goal, remarks.as_deref()).await {
                Ok(GoalOutcome::AlreadyCompleted) => {
                    presenter.notice(&format!("'{goal}' is already completed"));
                }
                Ok(_) => {}
                Err(e) => presenter.error(&e),
            }
        }
        Command::Add(goal) => {
            if let Err(e) = controller.add_goal(&goal).await {
                presenter.error(&e);
            }
        }
        Command::Status => {
            let snapshot = controller.snapshot().await;
            presenter.event(&Event::StateSnapshot(snapshot))?;
        }
        Command::Sound => presenter.sound(),
        Command::Finish {
            rating,
            comments,
            restart,
        } => match controller.finish_day(rating, &comments, restart).await {
            Ok(DayOutcome::Terminated) => return Ok(Flow::Stop),
            Ok(DayOutcome::Restarted) => {}
            Err(e) => presenter.error(&e),
        },
        Command::Setup {
            intention,
            goals,
            minutes,
        } => {
            let minutes = minutes.unwrap_or(default_minutes);
            if let Err(e) = controller.start_day(&intention, &goals, minutes).await {
                presenter.error(&e);
            }
        }
        Command::Help => presenter.notice(HELP),
        Command::Quit => return Ok(Flow::Stop),
    }
    Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        Command::parse(line).unwrap().unwrap()
    }

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(Command::parse("   ").unwrap(), None);
    }

    #[test]
    fn parses_simple_commands() {
        assert_eq!(parse("start"), Command::Start);
        assert_eq!(parse("  RESUME "), Command::Resume);
        assert_eq!(parse("status"), Command::Status);
        assert_eq!(parse("sound"), Command::Sound);
        assert_eq!(parse("exit"), Command::Quit);
    }

    #[test]
    fn pause_reason_is_optional() {
        assert_eq!(parse("pause"), Command::Pause(None));
        assert_eq!(
            parse("pause phone call"),
            Command::Pause(Some("phone call".into()))
        );
    }

    #[test]
    fn done_splits_remarks() {
        assert_eq!(
            parse("done Draft outline | took longer than planned"),
            Command::Done {
                goal: "Draft outline".into(),
                remarks: Some("took longer than planned".into()),
            }
        );
        assert_eq!(
            parse("done Review"),
            Command::Done {
                goal: "Review".into(),
                remarks: None,
            }
        );
        assert!(Command::parse("done | remarks only").is_err());
    }

    #[test]
    fn finish_and_restart_take_rating() {
        assert_eq!(
            parse("finish 8 good, focused day"),
            Command::Finish {
                rating: 8,
                comments: "good, focused day".into(),
                restart: false,
            }
        );
        assert_eq!(
            parse("restart 5"),
            Command::Finish {
                rating: 5,
                comments: String::new(),
                restart: true,
            }
        );
        assert!(Command::parse("finish great").is_err());
        assert!(Command::parse("finish").is_err());
    }

    #[test]
    fn setup_splits_sections() {
        assert_eq!(
            parse("setup Evening | Inbox, Notes | 30"),
            Command::Setup {
                intention: "Evening".into(),
                goals: vec![" Inbox".into(), " Notes ".into()],
                minutes: Some(30),
            }
        );
        assert_eq!(
            parse("setup Evening | Inbox"),
            Command::Setup {
                intention: "Evening".into(),
                goals: vec![" Inbox".into()],
                minutes: None,
            }
        );
        assert!(Command::parse("setup Evening | Inbox | soon").is_err());
    }

    #[test]
    fn unknown_command_is_reported() {
        let err = Command::parse("snooze").unwrap_err();
        assert!(err.contains("snooze"));
    }
}
