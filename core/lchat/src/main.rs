mod adapter;
mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;

#[cfg(test)]
mod tests;

use std::io::{self, IsTerminal};
use std::process;

use common::adapter::StdEnvResolver;
use common::error::Error;
use common::ports::outbound::{LogLevel, LogRecord};

use adapter::install_exit_on_interrupt;
use cli::{
    config_to_command, parse_args, print_completion, resolve_settings, run_interactive,
    write_exchange, Config, InteractiveOptions, ParseOutcome,
};
use domain::LchatCommand;
use ports::inbound::RunLchatApp;
use usecase::ChatSession;
use wiring::{wire_lchat, App};

/// Command をディスパッチする Runner（match は main レイヤーに集約）
struct Runner {
    app: App,
}

impl Runner {
    fn log(&self, record: LogRecord) {
        let _ = self.app.logger.log(&record.layer("cli"));
    }

    /// --new なら空の履歴、そうでなければ履歴ファイルから開く
    fn open_session(&self) -> Result<ChatSession, Error> {
        let settings = &self.app.settings;
        let deps = self.app.session_deps.clone();
        let session = if settings.new_chat {
            ChatSession::new(deps, settings.history_path.clone(), settings.prompt_style)
        } else {
            ChatSession::load(deps, settings.history_path.clone(), settings.prompt_style)?
        };
        self.log(
            LogRecord::new(LogLevel::Debug, "session opened")
                .kind("session")
                .field("history_path", session.history_path().display().to_string())
                .field("turns", session.turns().len())
                .field("new_chat", settings.new_chat),
        );
        Ok(session)
    }

    fn dispatch(&self, cmd: LchatCommand) -> Result<i32, Error> {
        match cmd {
            LchatCommand::Help => {
                print_help();
                Ok(0)
            }
            LchatCommand::ShowHistory => {
                let session = self.open_session()?;
                println!("{}", session.get_history_pretty()?);
                Ok(0)
            }
            LchatCommand::Send { message } => {
                self.install_interrupt_handler();
                let mut session = self.open_session()?;
                let exchange = session.send_message_detailed(&message)?;
                write_exchange(
                    &exchange,
                    self.app.settings.show_reasoning,
                    &mut io::stdout().lock(),
                    &mut io::stderr().lock(),
                )?;
                Ok(0)
            }
            LchatCommand::Interactive => {
                self.install_interrupt_handler();
                let mut session = self.open_session()?;
                let stdin = io::stdin();
                let options = InteractiveOptions {
                    prompt: stdin.is_terminal(),
                    show_reasoning: self.app.settings.show_reasoning,
                };
                run_interactive(
                    &mut session,
                    stdin.lock(),
                    &mut io::stdout().lock(),
                    &mut io::stderr().lock(),
                    &options,
                )
            }
        }
    }

    fn install_interrupt_handler(&self) {
        if let Err(e) = install_exit_on_interrupt(self.app.logger.clone()) {
            self.log(LogRecord::new(LogLevel::Warn, e.to_string()).kind("lifecycle"));
        }
    }
}

impl RunLchatApp for Runner {
    fn run(&self, config: Config) -> Result<i32, Error> {
        let cmd = config_to_command(config);
        let command_name = cmd_name_for_log(&cmd);
        self.log(
            LogRecord::new(LogLevel::Info, "command started")
                .kind("lifecycle")
                .field("command", command_name)
                .field("history_path", self.app.settings.history_path.display().to_string()),
        );

        let result = self.dispatch(cmd);

        let code = match &result {
            Ok(code) => *code,
            Err(e) => e.exit_code(),
        };
        self.log(
            LogRecord::new(LogLevel::Info, "command finished")
                .kind("lifecycle")
                .field("command", command_name)
                .field("exit_code", code),
        );
        if let Err(ref e) = result {
            self.log(LogRecord::new(LogLevel::Error, e.to_string()).kind("error"));
        }
        result
    }
}

fn cmd_name_for_log(cmd: &LchatCommand) -> &'static str {
    match cmd {
        LchatCommand::Help => "help",
        LchatCommand::ShowHistory => "history",
        LchatCommand::Send { .. } => "send",
        LchatCommand::Interactive => "interactive",
    }
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("lchat: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

pub fn run() -> Result<i32, Error> {
    let config = match parse_args()? {
        ParseOutcome::Config(c) => c,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
    };
    let env = StdEnvResolver;
    let settings = resolve_settings(&config, &env)?;
    let app = wire_lchat(settings, &env)?;
    let runner = Runner { app };
    runner.run(config)
}

fn print_usage() {
    eprintln!("Usage: lchat [options] [message...]");
}

fn print_help() {
    println!("Usage: lchat [options] [message...]");
    println!("Options:");
    println!("  -h, --help                 Show this help message");
    println!("  -v, --verbose              Mirror logs to stderr (for troubleshooting)");
    println!("  --new                      Start a new chat instead of loading the history file");
    println!("  --history                  Print the conversation history as JSON and exit");
    println!("  --show-reasoning           Print the model's <think> segment to stderr");
    println!("  --legacy-prompt            Render prompt lines as 'Userhello' (no separator)");
    println!("  -p, --provider <provider>  Inference provider: ollama (default) or echo");
    println!("  -m, --model <model>        Model id. Default: deepseek-r1:8b");
    println!("  --endpoint <url>           Generate endpoint. Default: http://localhost:11434/api/generate");
    println!("  -f, --history-file <path>  History file. Default: chat_log.json");
    println!("  --timeout <secs>           Request timeout. Default: none (wait indefinitely)");
    println!("  --generate <shell>         Generate shell completion script (bash, zsh, fish)");
    println!();
    println!("Environment:");
    println!("  LCHAT_PROVIDER, LCHAT_MODEL, LCHAT_ENDPOINT, LCHAT_HISTORY, LCHAT_TIMEOUT,");
    println!("  LCHAT_LEGACY_PROMPT   Same as the options above (flags take precedence).");
    println!("  LCHAT_LOG             Log file (JSONL). Default: $XDG_STATE_HOME/lchat/log.jsonl");
    println!();
    println!("Description:");
    println!("  With a message, send it once and print the answer.");
    println!("  Without, read one message per line from stdin until EOF or /quit.");
    println!("  Interactive commands: /history, /new, /quit");
    println!();
    println!("Examples:");
    println!("  lchat Hello, how are you?");
    println!("  lchat -m llama3:8b --show-reasoning Explain ownership in Rust");
    println!("  lchat --history");
}
