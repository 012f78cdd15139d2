use super::*;

#[test]
fn folds_fullwidth_alphanumerics() {
    assert_eq!(normalize_name("ＡＢＣ１２３"), "abc123");
}

#[test]
fn folds_fullwidth_punctuation() {
    assert_eq!(normalize_name("（５ｍｇ）"), "(5mg)");
    assert_eq!(normalize_name("！～"), "!~");
}

#[test]
fn strips_ideographic_space() {
    assert_eq!(normalize_name("ABC　123"), "abc123");
}

#[test]
fn fullwidth_and_halfwidth_spellings_agree() {
    assert_eq!(normalize_name("ABC　123"), normalize_name("abc 123"));
    assert_eq!(
        normalize_name("アムロジピン錠５ｍｇ「サワイ」"),
        normalize_name("アムロジピン錠 5mg「サワイ」")
    );
}

#[test]
fn strips_all_whitespace_runs() {
    assert_eq!(normalize_name("  a \t b\n c  "), "abc");
}

#[test]
fn leaves_kana_and_kanji_untouched() {
    assert_eq!(normalize_name("アスピリン"), "アスピリン");
    assert_eq!(normalize_name("薬品"), "薬品");
}

#[test]
fn does_not_fold_halfwidth_katakana_block() {
    // U+FF61..U+FF9F sits outside the folded range.
    assert_eq!(normalize_name("ｱｽﾋﾟﾘﾝ"), "ｱｽﾋﾟﾘﾝ");
}

#[test]
fn empty_input_yields_empty_key() {
    assert_eq!(normalize_name(""), "");
    assert_eq!(normalize_name("　 "), "");
}

#[test]
fn is_idempotent() {
    let samples = [
        "ＡＢＣ　１２３",
        "ロキソプロフェンＮａ錠６０ｍｇ",
        "  Mixed Case\tName ",
        "（２５ｍｇ）「ＴＥ」",
        "",
    ];
    for s in samples {
        let once = normalize_name(s);
        assert_eq!(normalize_name(&once), once, "not idempotent for {s:?}");
    }
}

#[test]
fn is_deterministic() {
    let s = "ファモチジン錠２０ｍｇ「日医工」";
    assert_eq!(normalize_name(s), normalize_name(s));
}
