//! チャットセッション
//!
//! メモリ上の履歴を唯一所有し、1 回のやり取りを
//! 「user 追記 → プロンプト描画 → 推論 → 推論部分の分離 → assistant 追記 → 保存」で行う。
//! 呼び出しは同期。同じセッションで並行に send_message を呼ぶことは想定しない。

use std::sync::Arc;

use common::domain::HistoryPath;
use common::error::Error;
use common::llm::InferenceProvider;
use common::msg::Turn;
use common::ports::outbound::{Log, LogLevel, LogRecord};

use crate::domain::{render_prompt, split_reasoning, History, PromptStyle};
use crate::ports::outbound::HistoryStore;

/// セッションが使うポート群（wiring が組み立てる）
#[derive(Clone)]
pub struct SessionDeps {
    pub store: Arc<dyn HistoryStore>,
    pub provider: Arc<dyn InferenceProvider>,
    pub log: Arc<dyn Log>,
}

/// 1 回のやり取りの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    /// 履歴に入った回答
    pub answer: String,
    /// `<think>` 内のテキスト（なければ空）
    pub reasoning: String,
    /// サーバーが返した done
    pub done: bool,
}

pub struct ChatSession {
    deps: SessionDeps,
    history: History,
    history_path: HistoryPath,
    prompt_style: PromptStyle,
}

impl ChatSession {
    /// 空の履歴で開始する（履歴ファイルは読まない）
    pub fn new(deps: SessionDeps, history_path: HistoryPath, prompt_style: PromptStyle) -> Self {
        Self {
            deps,
            history: History::new(),
            history_path,
            prompt_style,
        }
    }

    /// 履歴ファイルを読み込んで開始する。ファイルがなければ空の履歴。
    pub fn load(
        deps: SessionDeps,
        history_path: HistoryPath,
        prompt_style: PromptStyle,
    ) -> Result<Self, Error> {
        let turns = deps.store.load(&history_path)?;
        let mut session = Self::new(deps, history_path, prompt_style);
        session.history = History::from_turns(turns);
        Ok(session)
    }

    pub fn turns(&self) -> &[Turn] {
        self.history.turns()
    }

    pub fn history_path(&self) -> &HistoryPath {
        &self.history_path
    }

    /// メモリ上の履歴を空にする。ファイルは次の保存で上書きされる。
    pub fn new_chat(&mut self) {
        let dropped = self.history.len();
        self.history.clear();
        self.log(
            LogRecord::new(LogLevel::Info, "new chat started")
                .kind("session")
                .field("dropped_turns", dropped),
        );
    }

    /// メッセージを送り、回答のみを返す
    #[allow(dead_code)] // テストで使用。公開APIとして保持
    pub fn send_message(&mut self, text: &str) -> Result<String, Error> {
        self.send_message_detailed(text).map(|ex| ex.answer)
    }

    /// メッセージを送り、回答・推論部分・done を返す
    ///
    /// 応答を得られなかった場合（Network / Decode）は追記した user ターンを取り消す。
    /// 保存に失敗した場合（Io）はメモリ上に両ターンが残る。
    pub fn send_message_detailed(&mut self, text: &str) -> Result<Exchange, Error> {
        self.history.push_user(text);
        let prompt = render_prompt(self.history.turns(), self.prompt_style);
        self.log(
            LogRecord::new(LogLevel::Info, "exchange started")
                .kind("exchange")
                .field("provider", self.deps.provider.name())
                .field("turns", self.history.len())
                .field("prompt_len", prompt.len()),
        );

        let reply = match self.deps.provider.generate(&prompt) {
            Ok(reply) => reply,
            Err(e) => {
                self.history.rollback_pending_user();
                self.log(
                    LogRecord::new(LogLevel::Error, format!("exchange failed: {}", e))
                        .kind(e.kind_name())
                        .field("rolled_back", true)
                        .field("turns", self.history.len()),
                );
                return Err(e);
            }
        };
        if !reply.done {
            self.log(
                LogRecord::new(LogLevel::Warn, "reply is not marked done")
                    .kind("exchange")
                    .field("done", false),
            );
        }

        let split = split_reasoning(&reply.response);
        self.history.push_assistant(split.answer.clone());

        if let Err(e) = self.deps.store.save(&self.history_path, self.history.turns()) {
            self.log(
                LogRecord::new(LogLevel::Error, format!("history save failed: {}", e))
                    .kind(e.kind_name())
                    .field("turns", self.history.len()),
            );
            return Err(e);
        }

        self.log(
            LogRecord::new(LogLevel::Info, "exchange completed")
                .kind("exchange")
                .field("answer_len", split.answer.len())
                .field("reasoning_len", split.reasoning.len())
                .field("turns", self.history.len()),
        );
        Ok(Exchange {
            answer: split.answer,
            reasoning: split.reasoning,
            done: reply.done,
        })
    }

    /// 現在の履歴を JSON（1 行）で返す
    #[allow(dead_code)] // テストで使用。公開APIとして保持
    pub fn get_history(&self) -> Result<String, Error> {
        serde_json::to_string(self.history.turns())
            .map_err(|e| Error::encode(format!("Failed to serialize history: {}", e)))
    }

    /// 現在の履歴をインデント付き JSON で返す（表示用）
    pub fn get_history_pretty(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self.history.turns())
            .map_err(|e| Error::encode(format!("Failed to serialize history: {}", e)))
    }

    fn log(&self, record: LogRecord) {
        let _ = self.deps.log.log(&record.layer("usecase"));
    }
}
