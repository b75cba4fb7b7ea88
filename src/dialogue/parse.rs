//! Rule-based utterance parsers
//!
//! Every parser is a pure function `fn(&str) -> Option<T>` over
//! whitespace-stripped text and returns `None` when no recognizable signal
//! is present. The vocabulary leans heavily on phonetic/typo variants
//! because the input is spoken Korean that already went through STT once.
//!
//! These are the mandatory baseline; the LLM-enhanced variants in
//! [`crate::nlu::parser`] are consulted first when available and always
//! fall back here.

use std::sync::LazyLock;

use regex::Regex;

use crate::menu::{self, Category};
use crate::order::{DineType, OptionBundle, PaymentMethod, Size, Sweetness, Temp};

fn contains_any(norm: &str, keys: &[&str]) -> bool {
    keys.iter().any(|k| norm.contains(k))
}

/// "Start ordering" cue in the greeting state
#[must_use]
pub fn parse_start_cue(text: &str) -> bool {
    let norm = menu::normalize(text);
    contains_any(&norm, &["주문", "시작", "할게", "주세요", "살게", "먹을래"])
}

/// Takeout vs dine-in
#[must_use]
pub fn parse_dine_type(text: &str) -> Option<DineType> {
    let norm = menu::normalize(text);
    if contains_any(&norm, &["포장", "테이크아웃", "테이크", "가져갈", "들고갈", "싸주"]) {
        return Some(DineType::Takeout);
    }
    if contains_any(&norm, &["매장", "먹고갈", "먹고들", "여기서", "홀에서", "마시고갈"]) {
        return Some(DineType::DineIn);
    }
    None
}

/// Hot vs ice
#[must_use]
pub fn parse_temp(text: &str) -> Option<Temp> {
    let norm = menu::normalize(text);
    if contains_any(&norm, &["아이스", "차갑", "차가운", "시원", "ice", "얼음"]) {
        return Some(Temp::Ice);
    }
    if contains_any(&norm, &["뜨거", "따뜻", "따듯", "핫", "hot", "뜨겁"]) {
        return Some(Temp::Hot);
    }
    None
}

/// Cup size; small/medium/large labels map onto the drink sizes
#[must_use]
pub fn parse_size(text: &str) -> Option<Size> {
    let norm = menu::normalize(text);
    if contains_any(&norm, &["벤티", "벤치사이즈", "라지", "큰거", "큰걸로", "제일큰", "large"]) {
        return Some(Size::Venti);
    }
    if contains_any(&norm, &["그란데", "그랑데", "미디엄", "중간", "레귤러", "medium"]) {
        return Some(Size::Grande);
    }
    if contains_any(&norm, &["톨사이즈", "톨로", "톨", "스몰", "작은", "제일작은", "small"]) {
        return Some(Size::Tall);
    }
    None
}

static SHOT_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([1-3])샷|샷([1-3])").expect("valid shot regex"));

/// Extra-shot count mentioned in the text
///
/// Accepts 1-3 via digits or Korean number words; a bare mention of 샷
/// counts as one. Anything above three clamps by simply not matching.
fn parse_extra_shot(norm: &str) -> Option<u8> {
    if !norm.contains('샷') {
        return None;
    }
    if let Some(caps) = SHOT_DIGIT.captures(norm) {
        let digit = caps.get(1).or_else(|| caps.get(2));
        if let Some(d) = digit {
            if let Ok(n) = d.as_str().parse::<u8>() {
                return Some(n);
            }
        }
    }
    for (words, n) in [
        (["세샷", "샷세", "샷셋"].as_slice(), 3),
        (["두샷", "샷두", "샷둘"].as_slice(), 2),
        (["한샷", "샷한", "샷하나"].as_slice(), 1),
    ] {
        if contains_any(norm, words) {
            return Some(n);
        }
    }
    Some(1)
}

/// Option bundle mentioned in the text
///
/// Returns `None` when no option signal at all is present. Fields the text
/// does not mention stay at their defaults, so the caller can merge this
/// into an existing bundle without clobbering earlier turns.
#[must_use]
pub fn parse_options(text: &str) -> Option<OptionBundle> {
    let norm = menu::normalize(text);
    let mut bundle = OptionBundle::default();
    let mut matched = false;

    if let Some(shots) = parse_extra_shot(&norm) {
        bundle.extra_shot = shots;
        matched = true;
    }
    if contains_any(&norm, &["시럽", "바닐라시럽", "헤이즐넛"]) && !norm.contains("시럽빼") {
        bundle.syrup = true;
        matched = true;
    }
    if contains_any(&norm, &["디카페인", "디카프", "디캎", "카페인없"]) {
        bundle.decaf = Some(true);
        matched = true;
    } else if contains_any(&norm, &["카페인있", "일반으로", "디카페인말고"]) {
        bundle.decaf = Some(false);
        matched = true;
    }
    if contains_any(&norm, &["덜달게", "덜달", "당도낮", "안달게"]) {
        bundle.sweetness = Some(Sweetness::Low);
        matched = true;
    } else if contains_any(&norm, &["더달게", "많이달게", "당도높", "달달하게"]) {
        bundle.sweetness = Some(Sweetness::High);
        matched = true;
    } else if contains_any(&norm, &["보통당도", "당도보통", "기본당도"]) {
        bundle.sweetness = Some(Sweetness::Normal);
        matched = true;
    }

    matched.then_some(bundle)
}

/// "No options, as is" phrasing
#[must_use]
pub fn parse_no_options(text: &str) -> bool {
    let norm = menu::normalize(text);
    contains_any(
        &norm,
        &["없어요", "없습니다", "괜찮아요", "그대로", "기본으로", "그냥주세요", "안넣어"],
    )
}

/// Payment method
#[must_use]
pub fn parse_payment(text: &str) -> Option<PaymentMethod> {
    let norm = menu::normalize(text);
    if contains_any(&norm, &["카카오페이", "카카오", "앱결제", "앱으로", "모바일", "네이버페이", "페이로"]) {
        return Some(PaymentMethod::MobilePay);
    }
    if contains_any(&norm, &["쿠폰", "기프티콘", "교환권", "상품권"]) {
        return Some(PaymentMethod::Coupon);
    }
    if contains_any(&norm, &["카드", "체크", "신용"]) {
        return Some(PaymentMethod::Card);
    }
    if contains_any(&norm, &["현금", "지폐"]) {
        return Some(PaymentMethod::Cash);
    }
    None
}

/// Yes / no
#[must_use]
pub fn parse_yes_no(text: &str) -> Option<bool> {
    let norm = menu::normalize(text);
    if contains_any(&norm, &["아니", "아뇨", "안돼", "싫어", "안할", "빼주세요", "no"]) {
        return Some(false);
    }
    if contains_any(&norm, &["네", "예", "응", "좋아", "그래", "맞아", "맞습니다", "해주세요", "yes"]) {
        return Some(true);
    }
    None
}

/// Back / previous-step intent
///
/// A bare 취소 with no menu named counts as back; 취소 plus a menu name is
/// a cart-removal request and handled by [`parse_remove_intent`] instead.
#[must_use]
pub fn parse_back(text: &str) -> bool {
    let norm = menu::normalize(text);
    if contains_any(&norm, &["이전", "뒤로", "돌아가", "전단계", "전으로", "다시고를"]) {
        return true;
    }
    contains_any(&norm, &["취소", "그만할래"]) && menu::lookup(text, None).is_none()
}

/// Explicit "pay now" phrasing
#[must_use]
pub fn parse_pay_intent(text: &str) -> bool {
    let norm = menu::normalize(text);
    contains_any(&norm, &["결제", "계산", "얼마나왔", "지불"])
}

/// "Put it in the cart" phrasing
#[must_use]
pub fn parse_add_to_cart(text: &str) -> bool {
    let norm = menu::normalize(text);
    contains_any(&norm, &["담아", "담을게", "장바구니에", "카트에", "추가해줘"])
}

/// Does the text carry any cart-removal phrasing at all?
#[must_use]
pub fn has_remove_keyword(text: &str) -> bool {
    let norm = menu::normalize(text);
    contains_any(&norm, &["빼", "빼줘", "삭제", "지워", "취소", "없애", "바꿔"])
}

/// Cart-removal intent; resolves the named item when one is recognizable
#[must_use]
pub fn parse_remove_intent(text: &str) -> Option<(Category, &'static menu::MenuItem)> {
    if !has_remove_keyword(text) {
        return None;
    }
    menu::lookup(text, None)
}

/// "Where is X" UI-location question
///
/// Location keywords win over any menu name in the same sentence.
#[must_use]
pub fn parse_ui_location(text: &str) -> bool {
    let norm = menu::normalize(text);
    contains_any(
        &norm,
        &["어디에", "어디있", "어딨", "어디야", "어디서", "어디예요", "어디에요", "어디인가요", "어디죠"],
    ) || (norm.contains("어디") && contains_any(&norm, &["버튼", "곳", "위치"]))
}

/// Deterministic text-size utility intents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSizeAction {
    Enlarge,
    Shrink,
    Reset,
}

#[must_use]
pub fn parse_text_size(text: &str) -> Option<TextSizeAction> {
    let norm = menu::normalize(text);
    if !contains_any(&norm, &["글자", "글씨", "화면글"]) {
        return None;
    }
    if contains_any(&norm, &["크게", "키워", "확대"]) {
        return Some(TextSizeAction::Enlarge);
    }
    if contains_any(&norm, &["작게", "줄여", "축소"]) {
        return Some(TextSizeAction::Shrink);
    }
    if contains_any(&norm, &["원래", "초기화", "되돌려", "기본"]) {
        return Some(TextSizeAction::Reset);
    }
    None
}

/// "How does the barcode scanner work" question
#[must_use]
pub fn parse_barcode_help(text: &str) -> bool {
    let norm = menu::normalize(text);
    norm.contains("바코드") && contains_any(&norm, &["어떻게", "어떡", "방법", "뭐야", "사용법"])
}

const QUESTION_KEYWORDS: &[&str] = &[
    "?", "무엇", "뭐야", "뭔가", "어떤", "어떻게", "왜", "알려줘", "설명", "차이", "정보", "추천",
    "얼마",
];

const GENERAL_TOPICS: &[&str] = &[
    "커피", "음료", "메뉴", "디저트", "아메리카노", "라떼", "마끼아또", "마키아토", "에이드",
    "가격", "카페인", "원두",
];

/// Heuristic: is this a general-knowledge / off-script question?
#[must_use]
pub fn parse_general_question(text: &str) -> bool {
    let norm = menu::normalize(text);
    if norm.chars().count() < 3 {
        return false;
    }
    contains_any(&norm, QUESTION_KEYWORDS) && contains_any(&norm, GENERAL_TOPICS)
}

/// Card-slot completion keywords
#[must_use]
pub fn parse_card_done(text: &str) -> bool {
    let norm = menu::normalize(text);
    contains_any(&norm, &["됐어", "됐습니다", "완료", "넣었", "꽂았", "끼웠", "결제했"])
}

/// Coupon-scan completion keywords
#[must_use]
pub fn parse_coupon_done(text: &str) -> bool {
    let norm = menu::normalize(text);
    contains_any(&norm, &["됐어", "됐습니다", "완료", "스캔", "찍었", "댔어", "인식"])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsers_are_idempotent() {
        let t = "아이스 아메리카노 톨 사이즈 디카페인 샷 두 번 추가요";
        assert_eq!(parse_temp(t), parse_temp(t));
        assert_eq!(parse_size(t), parse_size(t));
        assert_eq!(parse_options(t), parse_options(t));
    }

    #[test]
    fn dine_type_variants() {
        assert_eq!(parse_dine_type("포장해 주세요"), Some(DineType::Takeout));
        assert_eq!(parse_dine_type("테이크아웃이요"), Some(DineType::Takeout));
        assert_eq!(parse_dine_type("매장에서 먹을게요"), Some(DineType::DineIn));
        assert_eq!(parse_dine_type("먹고 갈 거예요"), Some(DineType::DineIn));
        assert_eq!(parse_dine_type("아메리카노"), None);
    }

    #[test]
    fn temp_variants() {
        assert_eq!(parse_temp("아이스로 주세요"), Some(Temp::Ice));
        assert_eq!(parse_temp("차가운 걸로요"), Some(Temp::Ice));
        assert_eq!(parse_temp("뜨거운 거요"), Some(Temp::Hot));
        assert_eq!(parse_temp("따뜻하게요"), Some(Temp::Hot));
        assert_eq!(parse_temp("그란데요"), None);
    }

    #[test]
    fn size_variants() {
        assert_eq!(parse_size("톨 사이즈요"), Some(Size::Tall));
        assert_eq!(parse_size("스몰로 주세요"), Some(Size::Tall));
        assert_eq!(parse_size("그란데"), Some(Size::Grande));
        assert_eq!(parse_size("레귤러로요"), Some(Size::Grande));
        assert_eq!(parse_size("벤티로 할게요"), Some(Size::Venti));
        assert_eq!(parse_size("제일 큰 걸로"), Some(Size::Venti));
        assert_eq!(parse_size("아이스요"), None);
    }

    #[test]
    fn extra_shot_counts() {
        assert_eq!(parse_options("샷 추가요").unwrap().extra_shot, 1);
        assert_eq!(parse_options("샷 2개요").unwrap().extra_shot, 2);
        assert_eq!(parse_options("2샷 넣어주세요").unwrap().extra_shot, 2);
        assert_eq!(parse_options("샷 두 번이요").unwrap().extra_shot, 2);
        assert_eq!(parse_options("샷 세 개").unwrap().extra_shot, 3);
    }

    #[test]
    fn option_bundle_fields() {
        let opts = parse_options("디카페인으로 하고 바닐라 시럽 추가요").unwrap();
        assert_eq!(opts.decaf, Some(true));
        assert!(opts.syrup);
        assert_eq!(opts.extra_shot, 0);

        let opts = parse_options("덜 달게 해주세요").unwrap();
        assert_eq!(opts.sweetness, Some(Sweetness::Low));

        assert!(parse_options("톨 사이즈요").is_none());
    }

    #[test]
    fn no_option_phrasing() {
        assert!(parse_no_options("없어요"));
        assert!(parse_no_options("그냥 주세요"));
        assert!(!parse_no_options("샷 추가요"));
    }

    #[test]
    fn payment_variants() {
        assert_eq!(parse_payment("카드로 할게요"), Some(PaymentMethod::Card));
        assert_eq!(parse_payment("현금이요"), Some(PaymentMethod::Cash));
        assert_eq!(parse_payment("카카오페이로요"), Some(PaymentMethod::MobilePay));
        assert_eq!(parse_payment("기프티콘 있어요"), Some(PaymentMethod::Coupon));
        assert_eq!(parse_payment("아메리카노"), None);
    }

    #[test]
    fn yes_no_variants() {
        assert_eq!(parse_yes_no("네 맞아요"), Some(true));
        assert_eq!(parse_yes_no("좋아요"), Some(true));
        assert_eq!(parse_yes_no("아니요"), Some(false));
        assert_eq!(parse_yes_no("아뇨 됐어요"), Some(false));
        assert_eq!(parse_yes_no("아메리카노"), None);
    }

    #[test]
    fn back_vs_remove() {
        assert!(parse_back("이전으로 돌아가 주세요"));
        assert!(parse_back("취소할게요"));
        // 취소 plus a menu name is a removal, not back navigation
        assert!(!parse_back("아메리카노 취소해 주세요"));
        let (_, item) = parse_remove_intent("아메리카노 취소해 주세요").unwrap();
        assert_eq!(item.id, "COFFEE_AMERICANO");
        assert!(parse_remove_intent("샷 추가요").is_none());
    }

    #[test]
    fn ui_location_wins_even_with_menu_name() {
        assert!(parse_ui_location("결제 버튼이 어디에 있어요?"));
        assert!(parse_ui_location("아메리카노 버튼 어디 있어요"));
        assert!(parse_ui_location("카드 넣는 곳이 어디예요?"));
        assert!(parse_ui_location("쿠폰 스캔하는 곳은 어디인가요"));
        assert!(!parse_ui_location("아메리카노 주세요"));
    }

    #[test]
    fn text_size_utilities() {
        assert_eq!(parse_text_size("글자 크게 해줘"), Some(TextSizeAction::Enlarge));
        assert_eq!(parse_text_size("글씨 좀 작게"), Some(TextSizeAction::Shrink));
        assert_eq!(parse_text_size("글자 원래대로"), Some(TextSizeAction::Reset));
        assert_eq!(parse_text_size("크게 말해줘"), None);
    }

    #[test]
    fn general_question_heuristic() {
        assert!(parse_general_question("아메리카노랑 라떼 차이가 뭐야?"));
        assert!(parse_general_question("디저트 추천해 주세요"));
        assert!(parse_general_question("커피 가격이 얼마예요"));
        assert!(!parse_general_question("아메리카노 주세요"));
        assert!(!parse_general_question("네"));
    }

    #[test]
    fn completion_keywords() {
        assert!(parse_card_done("카드 넣었어요"));
        assert!(parse_card_done("결제했어요"));
        assert!(!parse_card_done("카드로 할게요"));
        assert!(parse_coupon_done("바코드 찍었어요"));
        assert!(parse_coupon_done("스캔 완료"));
    }
}
