//! 履歴からプロンプト文字列を組み立てる
//!
//! 1 ターン 1 行で、ロールラベルの直後に本文を置く。

use common::msg::Turn;

/// ラベルと本文の区切り方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptStyle {
    /// `User: hello`
    #[default]
    Labeled,
    /// `Userhello`（区切りなし。既存デプロイのプロンプトとバイト単位で一致させる場合）
    Legacy,
}

impl PromptStyle {
    fn separator(&self) -> &'static str {
        match self {
            PromptStyle::Labeled => ": ",
            PromptStyle::Legacy => "",
        }
    }
}

/// 全ターンを順に描画する
pub fn render_prompt(turns: &[Turn], style: PromptStyle) -> String {
    let mut prompt = String::new();
    for turn in turns {
        prompt.push_str(turn.role().label());
        prompt.push_str(style.separator());
        prompt.push_str(turn.content());
        prompt.push('\n');
    }
    prompt
}
