//! 人間向けログ（LogRecord → stderr に要点のみ出力）と複数 Sink への分配
//!
//! `-v/--verbose` 時に FileJsonLog と並べて使う。fields は巨大化防止のため切り詰める。

use crate::error::Error;
use crate::ports::outbound::{Log, LogLevel, LogRecord};
use std::io::Write;
use std::sync::Arc;

const FIELDS_SUMMARY_MAX: usize = 400;

/// fields の要点だけを短い文字列にする
fn fields_summary(record: &LogRecord) -> String {
    let Some(fields) = record.fields.as_ref().filter(|f| !f.is_empty()) else {
        return String::new();
    };
    let s = serde_json::to_string(fields).unwrap_or_default();
    if s.chars().count() <= FIELDS_SUMMARY_MAX {
        return s;
    }
    let truncated = s.chars().take(FIELDS_SUMMARY_MAX).collect::<String>();
    format!("{}... (len={})", truncated, s.len())
}

/// 1 行に整形する（テストのため stderr への書き出しと分離）
pub(crate) fn format_line(record: &LogRecord) -> String {
    let mut line = format!("[{}] {}", record.level.as_str(), record.message);
    if let Some(ref layer) = record.layer {
        line.push_str(&format!(" layer={}", layer));
    }
    if let Some(ref kind) = record.kind {
        line.push_str(&format!(" kind={}", kind));
    }
    let summary = fields_summary(record);
    if !summary.is_empty() {
        line.push(' ');
        line.push_str(&summary);
    }
    line
}

/// 指定レベル以上のレコードを stderr に出す Log 実装
pub struct StderrLog {
    max_level: LogLevel,
}

impl StderrLog {
    /// `max_level` までのレコードを出力する（Debug なら全件）
    pub fn new(max_level: LogLevel) -> Self {
        Self { max_level }
    }
}

impl Log for StderrLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        if record.level > self.max_level {
            return Ok(());
        }
        let mut err = std::io::stderr().lock();
        writeln!(err, "{}", format_line(record))?;
        Ok(())
    }
}

/// 複数の Log に同じレコードを配る。1 つが失敗しても残りには書く。
pub struct TeeLog {
    sinks: Vec<Arc<dyn Log>>,
}

impl TeeLog {
    pub fn new(sinks: Vec<Arc<dyn Log>>) -> Self {
        Self { sinks }
    }
}

impl Log for TeeLog {
    fn log(&self, record: &LogRecord) -> Result<(), Error> {
        let mut first_err = None;
        for sink in &self.sinks {
            if let Err(e) = sink.log(record) {
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}
