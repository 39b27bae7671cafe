//! Ctrl+C（SIGINT）でセッションを終了させるハンドラ
//!
//! 実行中の HTTP 要求は中断できないため、フラグではなくその場で終了する。
//! 履歴ファイルは最後に完了したやり取りまでを保持している。

use std::sync::Arc;

use common::error::Error;
use common::ports::outbound::{Log, LogLevel, LogRecord};

/// 割り込み終了時の終了コード（128 + SIGINT）
pub const INTERRUPTED_EXIT_CODE: i32 = 130;

/// SIGINT ハンドラを登録する。
/// 2 回目以降の登録は ctrlc の仕様でエラーになる。
pub fn install_exit_on_interrupt(log: Arc<dyn Log>) -> Result<(), Error> {
    ctrlc::set_handler(move || {
        let _ = log.log(
            &LogRecord::new(LogLevel::Info, "interrupted")
                .layer("cli")
                .kind("lifecycle")
                .field("exit_code", INTERRUPTED_EXIT_CODE),
        );
        eprintln!();
        std::process::exit(INTERRUPTED_EXIT_CODE);
    })
    .map_err(|e| Error::io_msg(format!("Failed to install Ctrl-C handler: {}", e)))
}
