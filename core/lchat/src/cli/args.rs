use crate::domain::LchatCommand;
use clap::builder::ArgAction;
use clap::value_parser;
use clap_complete::Shell;
use common::error::Error;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub help: bool,
    /// -v / --verbose: ログを stderr にも出す
    pub verbose: bool,
    /// --new: 履歴ファイルを読まずに空の会話で始める
    pub new_chat: bool,
    /// --history: 履歴を JSON で表示して終了
    pub show_history: bool,
    /// --show-reasoning: `<think>` 内のテキストを stderr に表示
    pub show_reasoning: bool,
    /// --legacy-prompt: ラベルと本文の間に区切りを入れない
    pub legacy_prompt: bool,
    pub provider: Option<String>,
    pub model: Option<String>,
    pub endpoint: Option<String>,
    pub history_file: Option<String>,
    pub timeout: Option<String>,
    pub message_args: Vec<String>,
}

/// 解析結果: 通常の Config / 補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

fn build_clap_command() -> clap::Command {
    clap::Command::new("lchat")
        .about("Chat with a local inference server and keep the conversation on disk")
        .disable_help_flag(true)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Show this help message")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Mirror logs to stderr (for troubleshooting)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("new")
                .long("new")
                .help("Start a new chat instead of loading the history file")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("history")
                .long("history")
                .help("Print the conversation history as JSON and exit")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("show-reasoning")
                .long("show-reasoning")
                .help("Print the model's <think> segment to stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("legacy-prompt")
                .long("legacy-prompt")
                .help("Render prompt lines without a separator after the role label")
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("provider")
                .short('p')
                .long("provider")
                .value_name("provider")
                .help("Inference provider (ollama, echo)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("model")
                .short('m')
                .long("model")
                .value_name("model")
                .help("Model id (e.g. deepseek-r1:8b)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("endpoint")
                .long("endpoint")
                .value_name("url")
                .help("Generate endpoint URL")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("history-file")
                .short('f')
                .long("history-file")
                .value_name("path")
                .help("History file (default: chat_log.json)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("timeout")
                .long("timeout")
                .value_name("secs")
                .help("Request timeout in seconds (default: none)")
                .num_args(1),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
        .arg(
            clap::Arg::new("positional")
                .index(1)
                .help("Message words (omit to chat interactively)")
                .num_args(0..)
                .trailing_var_arg(true),
        )
}

fn matches_to_config(matches: &clap::ArgMatches) -> Config {
    let opt = |id: &str| matches.get_one::<String>(id).cloned();
    Config {
        help: matches.get_flag("help"),
        verbose: matches.get_flag("verbose"),
        new_chat: matches.get_flag("new"),
        show_history: matches.get_flag("history"),
        show_reasoning: matches.get_flag("show-reasoning"),
        legacy_prompt: matches.get_flag("legacy-prompt"),
        provider: opt("provider"),
        model: opt("model"),
        endpoint: opt("endpoint"),
        history_file: opt("history-file"),
        timeout: opt("timeout"),
        message_args: matches
            .get_many::<String>("positional")
            .map(|i| i.cloned().collect())
            .unwrap_or_default(),
    }
}

/// コマンドラインを解析する。補完生成が要求された場合は ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    let matches = build_clap_command()
        .try_get_matches()
        .map_err(|e| Error::invalid_argument(e.to_string()))?;

    if let Some(&shell) = matches.get_one::<Shell>("generate") {
        return Ok(ParseOutcome::GenerateCompletion(shell));
    }

    Ok(ParseOutcome::Config(matches_to_config(&matches)))
}

/// テスト用: 引数スライスから解析する
#[allow(dead_code)]
pub fn parse_args_from(args: &[String]) -> Result<Config, Error> {
    let matches = build_clap_command()
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    Ok(matches_to_config(&matches))
}

/// 補完スクリプトを標準出力に出力する。
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, "lchat", &mut std::io::stdout());
}

/// Config を LchatCommand に変換する
pub fn config_to_command(config: Config) -> LchatCommand {
    if config.help {
        return LchatCommand::Help;
    }

    if config.show_history {
        return LchatCommand::ShowHistory;
    }

    let message = config.message_args.join(" ");
    if message.trim().is_empty() {
        return LchatCommand::Interactive;
    }
    LchatCommand::Send { message }
}
