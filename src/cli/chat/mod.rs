pub mod command;
pub mod prompt;

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use color_print::cformat;
use command::Command;
use crossterm::cursor::MoveToColumn;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use eyre::Result;
use rustyline::error::ReadlineError;
use tracing::warn;

use crate::api::huggingface::style_prompt;
use crate::api::{ChatApi, ImageApi, Translator};
use crate::config::{
    API_LANGUAGE, API_TIMEOUT, CHAT_TIMEOUT_MESSAGE, IMAGE_TIMEOUT_MESSAGE,
    TRANSLATE_BACK_TIMEOUT_MESSAGE, TRANSLATE_TIMEOUT_MESSAGE,
};
use crate::error::ChatError;
use crate::history::{HistoryStore, Message, Sender};
use crate::timeout::with_timeout;

const WELCOME_TEXT: &str = "
Hi, I'm Polyglot Chat. Type a message to talk to the model.

Things to try
• Ask something in your own language with /translate on.
• /image a fox in the snow
• /style oil painting

/help         Show the help dialogue
/quit         Quit the application
";

const HELP_TEXT: &str = "
Polyglot Chat CLI

/model [id]      Show or set the chat model
/style [text]    Show or set the image style descriptor
/translate       Toggle translation of input and replies
/image <prompt>  Generate an image from a prompt
/history         Re-render the saved conversation
/clear           Clear the saved conversation
/help            Show this help dialogue
/quit            Quit the application
";

const WORKING_INDICATOR: &str = "· · ·";

/// Session state the UI selectors of the original map onto. A turn captures
/// these at the moment it starts; later changes do not affect it.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub model: String,
    pub style: String,
    pub translate: bool,
    pub base_lang: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            model: crate::config::DEFAULT_MODEL.to_string(),
            style: crate::config::DEFAULT_IMAGE_STYLE.to_string(),
            translate: false,
            base_lang: crate::config::DEFAULT_BASE_LANGUAGE.to_string(),
        }
    }
}

/// Which action submitted the turn. Both kinds run through the same
/// orchestration path, so only one turn at a time can exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TurnKind {
    Chat,
    Image,
}

pub struct ChatContext {
    output: Box<dyn Write>,
    history: HistoryStore,
    chat_api: Box<dyn ChatApi>,
    image_api: Box<dyn ImageApi>,
    translator: Box<dyn Translator>,
    settings: SessionSettings,
    api_timeout: Duration,
    image_dir: PathBuf,
    input: Option<String>,
    interactive: bool,
}

impl ChatContext {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        output: Box<dyn Write>,
        history: HistoryStore,
        chat_api: Box<dyn ChatApi>,
        image_api: Box<dyn ImageApi>,
        translator: Box<dyn Translator>,
        settings: SessionSettings,
        input: Option<String>,
        interactive: bool,
    ) -> Self {
        Self {
            output,
            history,
            chat_api,
            image_api,
            translator,
            settings,
            api_timeout: API_TIMEOUT,
            image_dir: std::env::temp_dir(),
            input,
            interactive,
        }
    }

    pub async fn run(&mut self) -> Result<ExitCode> {
        if self.interactive {
            self.print_welcome()?;
        }

        // Replay the persisted conversation, original order.
        self.render_saved_history()?;

        // Non-interactive mode (single turn)
        if let Some(input) = self.input.take() {
            self.dispatch(Command::parse(&input)).await?;
            return Ok(ExitCode::SUCCESS);
        }

        if self.interactive {
            self.run_interactive().await?;
        }

        Ok(ExitCode::SUCCESS)
    }

    fn print_welcome(&mut self) -> Result<()> {
        writeln!(self.output, "{}", WELCOME_TEXT)?;
        Ok(())
    }

    async fn run_interactive(&mut self) -> Result<()> {
        let mut rl = prompt::rl()?;

        loop {
            let prompt_text = prompt::generate_prompt(None);
            let readline = rl.readline(&prompt_text);

            match readline {
                Ok(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }

                    rl.add_history_entry(line.as_str());

                    let command = Command::parse(&line);
                    if command == Command::Quit {
                        break;
                    }

                    if let Err(e) = self.dispatch(command).await {
                        writeln!(self.output, "Error: {}", e)?;
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(e) => {
                    writeln!(self.output, "Error: {}", e)?;
                    break;
                }
            }
        }

        Ok(())
    }

    async fn dispatch(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Help => {
                writeln!(self.output, "{}", HELP_TEXT)?;
            }
            Command::Quit => {}
            Command::Clear => {
                self.history.clear()?;
                writeln!(self.output, "History cleared.")?;
            }
            Command::History => {
                self.render_saved_history()?;
            }
            Command::ToggleTranslate => {
                self.settings.translate = !self.settings.translate;
                let state = if self.settings.translate { "on" } else { "off" };
                writeln!(self.output, "Translation is now {}.", state)?;
            }
            Command::Model(None) => {
                writeln!(self.output, "Current model: {}", self.settings.model)?;
            }
            Command::Model(Some(model)) => {
                self.settings.model = model;
                writeln!(self.output, "Model set to {}.", self.settings.model)?;
            }
            Command::Style(None) => {
                writeln!(self.output, "Current image style: {}", self.settings.style)?;
            }
            Command::Style(Some(style)) => {
                self.settings.style = style;
                writeln!(self.output, "Image style set to {}.", self.settings.style)?;
            }
            Command::Image(prompt) => {
                self.run_turn(TurnKind::Image, &prompt).await?;
            }
            Command::Chat(text) => {
                self.run_turn(TurnKind::Chat, &text).await?;
            }
            Command::Unknown(name) => {
                writeln!(self.output, "Unknown command {}. Type /help.", name)?;
            }
        }

        Ok(())
    }

    /// Drive one turn: Idle → Composing → (Translating-In)? →
    /// Awaiting-Response → (Translating-Out)? → Rendering → Idle, with any
    /// failure jumping to error rendering. The indicator is cleared and the
    /// prompt comes back on both paths.
    async fn run_turn(&mut self, kind: TurnKind, input: &str) -> Result<()> {
        let text = input.trim().to_string();
        if text.is_empty() {
            // Empty submit is a no-op: nothing rendered, nothing called.
            return Ok(());
        }

        let settings = self.settings.clone();

        self.render_message(&Message::user(text.as_str()))?;
        self.show_working_indicator()?;

        let outcome = match kind {
            TurnKind::Chat => self.chat_turn(&text, &settings).await,
            TurnKind::Image => self.image_turn(&text, &settings).await,
        };

        self.clear_working_indicator()?;

        match outcome {
            Ok(reply) => {
                let message = Message::bot(reply);
                self.render_message(&message)?;
                self.history.append(message)?;
            }
            Err(e) => {
                // Error bubbles are rendered but never persisted.
                let label = match kind {
                    TurnKind::Chat => "Error",
                    TurnKind::Image => "Image generation error",
                };
                self.render_message(&Message::bot(format!("{label}: {e}")))?;
            }
        }

        Ok(())
    }

    async fn chat_turn(
        &self,
        text: &str,
        settings: &SessionSettings,
    ) -> Result<String, ChatError> {
        let api_text = if settings.translate {
            self.translate_step(text, API_LANGUAGE, TRANSLATE_TIMEOUT_MESSAGE)
                .await?
        } else {
            text.to_string()
        };

        let reply = with_timeout(
            self.chat_api.complete(&settings.model, &api_text),
            self.api_timeout,
            CHAT_TIMEOUT_MESSAGE,
        )
        .await?;

        if settings.translate {
            self.translate_step(&reply, &settings.base_lang, TRANSLATE_BACK_TIMEOUT_MESSAGE)
                .await
        } else {
            Ok(reply)
        }
    }

    async fn image_turn(
        &self,
        text: &str,
        settings: &SessionSettings,
    ) -> Result<String, ChatError> {
        let api_text = if settings.translate {
            self.translate_step(text, API_LANGUAGE, TRANSLATE_TIMEOUT_MESSAGE)
                .await?
        } else {
            text.to_string()
        };

        let prompt = style_prompt(&settings.style, &api_text);

        let bytes = with_timeout(
            self.image_api.generate(&prompt),
            self.api_timeout,
            IMAGE_TIMEOUT_MESSAGE,
        )
        .await?;

        let path = self.write_image(&bytes)?;
        Ok(format!("[image {}] {}", path.display(), prompt))
    }

    /// Translate with the shared deadline. Transport and parse failures are
    /// recoverable: the original text is kept and the failure logged. A
    /// timeout fails the turn.
    async fn translate_step(
        &self,
        text: &str,
        target_lang: &str,
        timeout_message: &str,
    ) -> Result<String, ChatError> {
        let result = with_timeout(
            self.translator.translate(text, target_lang),
            self.api_timeout,
            timeout_message,
        )
        .await;

        match result {
            Ok(translated) => Ok(translated),
            Err(e) if e.is_recoverable_translation_failure() => {
                warn!(target_lang, "translation failed, keeping original text: {e}");
                Ok(text.to_string())
            }
            Err(e) => Err(e),
        }
    }

    /// Persist image bytes to a transient file the transcript can reference.
    fn write_image(&self, bytes: &[u8]) -> Result<PathBuf, ChatError> {
        let name = format!(
            "chat-image-{}.png",
            chrono::Utc::now().format("%Y%m%d-%H%M%S%.3f")
        );
        let path = self.image_dir.join(name);
        std::fs::write(&path, bytes)?;
        Ok(path)
    }

    fn render_saved_history(&mut self) -> Result<()> {
        let messages = self.history.messages().to_vec();
        for message in &messages {
            self.render_message(message)?;
        }
        Ok(())
    }

    fn render_message(&mut self, message: &Message) -> Result<()> {
        let label = match message.sender {
            Sender::User => cformat!("<bold><blue>you></blue></bold>"),
            Sender::Bot => cformat!("<bold><green>bot></green></bold>"),
        };
        writeln!(self.output, "{} {}", label, message.content)?;
        Ok(())
    }

    fn show_working_indicator(&mut self) -> Result<()> {
        if self.interactive {
            write!(self.output, "{}", WORKING_INDICATOR)?;
            self.output.flush()?;
        } else {
            writeln!(self.output, "{}", WORKING_INDICATOR)?;
        }
        Ok(())
    }

    fn clear_working_indicator(&mut self) -> Result<()> {
        if self.interactive {
            execute!(self.output, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
        }
        Ok(())
    }
}
