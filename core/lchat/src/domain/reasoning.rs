//! 応答テキストから推論部分（`<think>...</think>`）を切り出す
//!
//! 最初の開始マーカーと、その後ろで最初に現れる終了マーカーの組だけを扱う。
//! 改行をまたいでも一致する。2 組目以降は answer 側にそのまま残る。

pub const THINK_OPEN: &str = "<think>";
pub const THINK_CLOSE: &str = "</think>";

/// 切り出し結果
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReasoningSplit {
    /// マーカー間のテキスト（マーカーがなければ空）
    pub reasoning: String,
    /// 元テキストからマーカー組と中身を除いたもの
    pub answer: String,
}

/// `text` を推論部分と回答部分に分ける
///
/// 終了マーカーのない開始マーカーは切り出さない（answer は入力のまま）。
pub fn split_reasoning(text: &str) -> ReasoningSplit {
    let unsplit = || ReasoningSplit {
        reasoning: String::new(),
        answer: text.to_string(),
    };
    let Some(open) = text.find(THINK_OPEN) else {
        return unsplit();
    };
    let body_start = open + THINK_OPEN.len();
    let Some(close_rel) = text[body_start..].find(THINK_CLOSE) else {
        return unsplit();
    };
    let body_end = body_start + close_rel;
    let rest = body_end + THINK_CLOSE.len();

    let mut answer = String::with_capacity(text.len() - (rest - open));
    answer.push_str(&text[..open]);
    answer.push_str(&text[rest..]);
    ReasoningSplit {
        reasoning: text[body_start..body_end].to_string(),
        answer,
    }
}
