//! Japanese UI strings. This is the only supported locale.

use drill_core::AnswerRecord;
use drill_core::model::{Difficulty, Operation, ResultBand, SetSummary};

use crate::auth::AuthFailure;

pub const APP_TITLE: &str = "算数ドリル";
pub const CHOOSE_ANSWER: &str = "答えを選んでください：";
pub const SOLVED_TODAY: &str = "今日解いた問題数";
pub const RESTART_SET: &str = "もう一度挑戦";
pub const BACK_TO_SELECTION: &str = "難易度選択に戻る";
pub const RESULTS_TITLE: &str = "結果発表";

#[must_use]
pub fn operation_heading(operation: Operation) -> &'static str {
    match operation {
        Operation::Addition => "足し算問題",
        Operation::Subtraction => "引き算問題",
    }
}

#[must_use]
pub fn difficulty_label(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "かんたん（1〜3）",
        Difficulty::Medium => "ふつう（答えが9以下）",
        Difficulty::Hard => "むずかしい（1〜9）",
    }
}

/// Feedback line shown after an answer.
#[must_use]
pub fn feedback(record: &AnswerRecord) -> String {
    if record.is_correct {
        "正解です！🎉".to_string()
    } else {
        format!("不正解です。正解は {} です。", record.correct_answer)
    }
}

#[must_use]
pub fn your_answer(record: &AnswerRecord) -> String {
    format!("あなたの答え: {}", record.selected)
}

#[must_use]
pub fn next_button(is_last_question: bool) -> &'static str {
    if is_last_question {
        "結果を見る"
    } else {
        "次の問題"
    }
}

#[must_use]
pub fn question_counter(index: u32, total: u32) -> String {
    format!("問題 {index} / {total}")
}

#[must_use]
pub fn correct_counter(correct: u32) -> String {
    format!("正解数: {correct}")
}

#[must_use]
pub fn band_message(band: ResultBand) -> &'static str {
    match band {
        ResultBand::Perfect => "パーフェクト！素晴らしいです！",
        ResultBand::Excellent => "とても良くできました！",
        ResultBand::Good => "よく頑張りました！",
        ResultBand::NeedsPractice => "もう少し練習してみましょう！",
        ResultBand::KeepTrying => "諦めずに頑張りましょう！",
    }
}

#[must_use]
pub fn band_icon(band: ResultBand) -> &'static str {
    match band {
        ResultBand::Perfect => "🏆",
        ResultBand::Excellent => "🌟",
        ResultBand::Good => "👍",
        ResultBand::NeedsPractice => "💪",
        ResultBand::KeepTrying => "📚",
    }
}

/// "7 / 10 (正解率: 70%)"
#[must_use]
pub fn score_line(summary: &SetSummary) -> String {
    format!(
        "{} / {}（正解率: {}%）",
        summary.correct(),
        summary.total(),
        summary.percentage()
    )
}

#[must_use]
pub fn auth_failure(failure: &AuthFailure) -> &'static str {
    match failure {
        AuthFailure::UserNotFound => "このメールアドレスのユーザーは見つかりません",
        AuthFailure::WrongPassword => "パスワードが正しくありません",
        AuthFailure::EmailInUse => "このメールアドレスは既に使用されています",
        AuthFailure::WeakPassword => "パスワードは6文字以上で入力してください",
        AuthFailure::InvalidEmail => "有効なメールアドレスを入力してください",
        AuthFailure::Other => "認証に失敗しました。もう一度お試しください",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_names_the_correct_answer() {
        let wrong = AnswerRecord {
            selected: 4,
            correct_answer: 5,
            is_correct: false,
        };
        assert_eq!(feedback(&wrong), "不正解です。正解は 5 です。");
        assert_eq!(your_answer(&wrong), "あなたの答え: 4");

        let right = AnswerRecord {
            selected: 5,
            correct_answer: 5,
            is_correct: true,
        };
        assert_eq!(feedback(&right), "正解です！🎉");
    }

    #[test]
    fn score_line_shows_percentage() {
        let summary = SetSummary::new(8, 10).unwrap();
        assert_eq!(score_line(&summary), "8 / 10（正解率: 80%）");
        assert_eq!(band_message(summary.band()), "とても良くできました！");
    }

    #[test]
    fn auth_failures_have_messages() {
        let failure = AuthFailure::from_code("auth/weak-password");
        assert_eq!(auth_failure(&failure), "パスワードは6文字以上で入力してください");
        assert_eq!(
            auth_failure(&AuthFailure::from_code("unknown")),
            "認証に失敗しました。もう一度お試しください"
        );
    }
}
