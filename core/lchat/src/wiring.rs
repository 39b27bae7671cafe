//! 配線: 標準アダプタでセッションの依存を組み立てる

use std::sync::Arc;

use common::adapter::{FileJsonLog, NoopLog, StdFileSystem, StderrLog, TeeLog};
use common::error::Error;
use common::llm::create_provider;
use common::ports::outbound::{EnvResolver, FileSystem, Log, LogLevel};

use crate::adapter::JsonHistoryStore;
use crate::cli::Settings;
use crate::usecase::SessionDeps;

/// 配線で組み立てたポート群（main の Command ディスパッチで利用）
pub struct App {
    pub settings: Settings,
    /// 構造化ログ（ファイルへ JSONL、-v 時は stderr にも）
    pub logger: Arc<dyn Log>,
    pub session_deps: SessionDeps,
}

/// ログの出力先を決める。ログファイルが解決できなければファイルには書かない。
fn wire_logger(fs: &Arc<dyn FileSystem>, env: &dyn EnvResolver, verbose: bool) -> Arc<dyn Log> {
    let file_log: Arc<dyn Log> = env
        .resolve_log_file_path()
        .map(|path| Arc::new(FileJsonLog::new(Arc::clone(fs), path)) as Arc<dyn Log>)
        .unwrap_or_else(|_| Arc::new(NoopLog));
    if verbose {
        Arc::new(TeeLog::new(vec![
            file_log,
            Arc::new(StderrLog::new(LogLevel::Debug)),
        ]))
    } else {
        file_log
    }
}

/// 配線: 標準アダプタで App を組み立てる
pub fn wire_lchat(settings: Settings, env: &dyn EnvResolver) -> Result<App, Error> {
    let fs: Arc<dyn FileSystem> = Arc::new(StdFileSystem);
    let logger = wire_logger(&fs, env, settings.verbose);
    wire_lchat_with(settings, fs, logger)
}

/// 配線（FS とログを外から渡す。テスト用の入口）
pub fn wire_lchat_with(
    settings: Settings,
    fs: Arc<dyn FileSystem>,
    logger: Arc<dyn Log>,
) -> Result<App, Error> {
    let provider = create_provider(
        settings.provider,
        &settings.provider_options,
        Arc::clone(&logger),
    )?;
    let store = Arc::new(JsonHistoryStore::new(fs, Arc::clone(&logger)));
    Ok(App {
        settings,
        logger: Arc::clone(&logger),
        session_deps: SessionDeps {
            store,
            provider,
            log: logger,
        },
    })
}
