//! 対話ループと応答の表示
//!
//! 1 行 1 メッセージで読み、応答を表示する。失敗したやり取りはエラーを表示して続ける。

use std::io::{BufRead, Write};

use common::error::Error;

use crate::usecase::{ChatSession, Exchange};

/// 対話ループの表示オプション
#[derive(Debug, Clone, Default)]
pub struct InteractiveOptions {
    /// 入力前に `> ` を出す（端末のときのみ）
    pub prompt: bool,
    pub show_reasoning: bool,
}

/// 応答を出力する。推論部分は `err` 側、回答は `out` 側。
pub fn write_exchange<W: Write, E: Write>(
    exchange: &Exchange,
    show_reasoning: bool,
    out: &mut W,
    err: &mut E,
) -> Result<(), Error> {
    let reasoning = exchange.reasoning.trim();
    if show_reasoning && !reasoning.is_empty() {
        writeln!(err, "[reasoning]\n{}\n", reasoning)?;
    }
    if !exchange.done {
        writeln!(err, "(reply was not marked done; it may be incomplete)")?;
    }
    writeln!(out, "{}", exchange.answer.trim())?;
    out.flush()?;
    Ok(())
}

/// 標準入力などから読み終わるまでやり取りを続ける。戻り値は終了コード。
pub fn run_interactive<R: BufRead, W: Write, E: Write>(
    session: &mut ChatSession,
    input: R,
    out: &mut W,
    err: &mut E,
    options: &InteractiveOptions,
) -> Result<i32, Error> {
    let mut lines = input.lines();
    loop {
        if options.prompt {
            write!(out, "> ")?;
            out.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let message = line.trim();
        match message {
            "" => continue,
            "/quit" | "/exit" => break,
            "/history" => {
                writeln!(out, "{}", session.get_history_pretty()?)?;
                continue;
            }
            "/new" => {
                session.new_chat();
                writeln!(err, "(new chat)")?;
                continue;
            }
            _ => {}
        }
        match session.send_message_detailed(message) {
            Ok(exchange) => write_exchange(&exchange, options.show_reasoning, out, err)?,
            Err(e) => writeln!(err, "lchat: {}", e)?,
        }
    }
    if options.prompt {
        writeln!(out)?;
    }
    Ok(0)
}
