//! Line-oriented terminal front end for the `play` command.

use std::fmt::Write as _;

use quiz_core::{RenderCommand, TopicTile, UserIntent};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use ui::vm::{feedback_message, format_elapsed, markdown_to_text};

pub const HELP: &str = "\
Commands:
  topics          list topics
  open <id|n>     open a topic's lesson
  start           start the quiz for the open topic
  <n>             answer with option n
  back            return to the lesson
  retake          retake the quiz
  help            show this help
  quit            leave";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TerminalError {
    #[error("unknown command `{0}`; type `help`")]
    UnknownCommand(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("open a topic first")]
    NoTopicOpen,
    #[error("options are numbered from 1")]
    ZeroChoice,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Intent(UserIntent),
    ShowTopics,
    Help,
    Quit,
    Nothing,
}

/// What the terminal remembers from the render stream so short commands
/// (`start`, `back`, `open 2`) can be expanded into full intents.
#[derive(Debug, Default)]
pub struct TerminalState {
    topics: Vec<TopicTile>,
    current_topic: Option<String>,
    last_engagement: Option<u8>,
}

impl TerminalState {
    /// Update from a render command and return the text to print, if any.
    pub fn observe(&mut self, command: &RenderCommand) -> Option<String> {
        match command {
            RenderCommand::Topics { topics } => {
                self.topics.clone_from(topics);
                Some(self.topic_list())
            }
            RenderCommand::Lesson {
                topic_id,
                title,
                lesson_text,
            } => {
                self.current_topic = Some(topic_id.to_string());
                Some(format!(
                    "\n== {title} - Lesson ==\n{}\n\nType `start` to begin the quiz.",
                    markdown_to_text(lesson_text).trim_end()
                ))
            }
            RenderCommand::Question {
                topic_id,
                prompt,
                options,
                number,
                total,
            } => {
                self.current_topic = Some(topic_id.to_string());
                let mut out = format!("\nQuestion {number} of {total}\nQ{number}. {prompt}");
                for (i, option) in options.iter().enumerate() {
                    let _ = write!(out, "\n  {}) {option}", i + 1);
                }
                Some(out)
            }
            RenderCommand::Feedback {
                correct,
                correct_option_text,
                points,
            } => Some(feedback_message(*correct, correct_option_text, *points)),
            RenderCommand::Summary(summary) => Some(format!(
                "\n== Quiz Complete: {} ==\nScore: {} / {}\nXP earned: {}\nBonus: {}\nTime: {}\n\nType `back` or `retake`.",
                summary.topic_title,
                summary.correct_count,
                summary.total_questions,
                summary.earned_xp,
                summary.bonus,
                format_elapsed(summary.started_at, summary.completed_at),
            )),
            RenderCommand::Error { message } => {
                self.current_topic = None;
                Some(format!("error: {message}"))
            }
            RenderCommand::Progress { xp, level } => Some(format!("[XP {xp} | Level {level}]")),
            RenderCommand::Engagement { value } => {
                // Sampled every tick; only changes are worth a line.
                if self.last_engagement.replace(*value) == Some(*value) {
                    None
                } else {
                    Some(format!("[Avg engagement {value}%]"))
                }
            }
        }
    }

    pub fn topic_list(&self) -> String {
        let mut out = String::from("Topics:");
        for (i, tile) in self.topics.iter().enumerate() {
            let _ = write!(out, "\n  {}. {} ({})", i + 1, tile.title, tile.id);
        }
        out
    }

    /// # Errors
    ///
    /// Returns a `TerminalError` for input that names no command or lacks
    /// the topic it refers to.
    pub fn parse(&self, line: &str) -> Result<Input, TerminalError> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(Input::Nothing);
        };
        let arg = words.next();

        let input = match head.to_ascii_lowercase().as_str() {
            "help" | "?" => Input::Help,
            "quit" | "exit" | "q" => Input::Quit,
            "topics" | "ls" => Input::ShowTopics,
            "open" => {
                let arg = arg.ok_or(TerminalError::MissingArgument("open"))?;
                Input::Intent(UserIntent::SelectTopic(self.resolve_topic(arg)))
            }
            "start" => Input::Intent(UserIntent::StartQuiz(self.current()?)),
            "back" => Input::Intent(UserIntent::BackToLesson(self.current()?)),
            "retake" => Input::Intent(UserIntent::Retake(self.current()?)),
            other => match other.parse::<usize>() {
                Ok(0) => return Err(TerminalError::ZeroChoice),
                Ok(n) => Input::Intent(UserIntent::AnswerSelected(n - 1)),
                Err(_) => return Err(TerminalError::UnknownCommand(head.to_string())),
            },
        };
        Ok(input)
    }

    fn current(&self) -> Result<String, TerminalError> {
        self.current_topic.clone().ok_or(TerminalError::NoTopicOpen)
    }

    /// A list number picks from the last topic list; anything else is an id.
    fn resolve_topic(&self, arg: &str) -> String {
        arg.parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| self.topics.get(i))
            .map_or_else(|| arg.to_string(), |tile| tile.id.to_string())
    }
}

/// Read commands from `input` and print renders to `output`.
///
/// `quit` or end of input stops reading; renders already requested are
/// still printed until the runtime closes the stream.
pub async fn run<R, W>(
    input: R,
    mut output: W,
    intents: UnboundedSender<UserIntent>,
    mut renders: UnboundedReceiver<RenderCommand>,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut state = TerminalState::default();
    let mut lines = input.lines();
    let mut intents = Some(intents);
    write_line(&mut output, HELP).await?;

    loop {
        tokio::select! {
            command = renders.recv() => {
                let Some(command) = command else { break };
                if let Some(text) = state.observe(&command) {
                    write_line(&mut output, &text).await?;
                }
            }
            line = lines.next_line(), if intents.is_some() => {
                let Some(line) = line? else {
                    intents = None;
                    continue;
                };
                match state.parse(&line) {
                    Ok(Input::Intent(intent)) => {
                        if intents.as_ref().is_some_and(|tx| tx.send(intent).is_err()) {
                            tracing::warn!("quiz runtime stopped");
                            intents = None;
                        }
                    }
                    Ok(Input::ShowTopics) => write_line(&mut output, &state.topic_list()).await?,
                    Ok(Input::Help) => write_line(&mut output, HELP).await?,
                    Ok(Input::Quit) => intents = None,
                    Ok(Input::Nothing) => {}
                    Err(err) => write_line(&mut output, &err.to_string()).await?,
                }
            }
        }
    }
    Ok(())
}

async fn write_line<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> std::io::Result<()> {
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await
}
