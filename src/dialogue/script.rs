//! Fixed response lines and the order-sentence builders
//!
//! Every user-visible failure is a spoken sentence, never an error code.
//! The two builders render only the options relevant to the category and
//! skip unset fields instead of printing empty placeholders.

use crate::menu::Category;
use crate::order::{CartItem, OptionBundle, PaymentMethod};

pub const GREETING: &str =
    "안녕하세요! 보이스 카페입니다. 주문을 시작하시려면 '주문할게요'라고 말씀해 주세요.";
pub const ASK_DINE_TYPE: &str = "포장해서 가져가시나요, 매장에서 드시나요?";
pub const REPROMPT_DINE_TYPE: &str =
    "포장이신가요, 매장에서 드실 건가요? '포장' 또는 '매장'이라고 말씀해 주세요.";
pub const ASK_MENU: &str =
    "메뉴를 말씀해 주세요. 커피, 에이드, 차, 디저트가 준비되어 있어요.";
pub const MENU_NOT_FOUND: &str =
    "죄송해요, 말씀하신 메뉴를 찾지 못했어요. 다시 한번 말씀해 주시겠어요?";
pub const ASK_TEMP: &str = "따뜻한 걸로 드릴까요, 아이스로 드릴까요?";
pub const ASK_SIZE: &str = "사이즈는 톨, 그란데, 벤티 중에 어떤 걸로 드릴까요?";
pub const ASK_OPTIONS_COFFEE: &str =
    "샷 추가나 시럽, 디카페인 같은 옵션이 필요하세요? 없으면 '없어요'라고 말씀해 주세요.";
pub const ASK_OPTIONS_ADE: &str =
    "당도는 어떻게 해드릴까요? 덜 달게, 보통, 더 달게 중에 말씀해 주세요.";
pub const REPROMPT_YES_NO: &str = "'네' 또는 '아니요'로 말씀해 주세요.";
pub const ASK_PAYMENT: &str =
    "결제는 카드, 현금, 카카오페이, 쿠폰 중에 어떻게 하시겠어요?";
pub const CARD_PROMPT: &str =
    "카드를 단말기에 넣어주세요. 다 되셨으면 '됐어요'라고 말씀해 주세요.";
pub const COUPON_PROMPT: &str =
    "쿠폰 바코드를 스캐너에 대주세요. 다 되셨으면 '됐어요'라고 말씀해 주세요.";
pub const EMPTY_CART: &str = "아직 담긴 메뉴가 없어요. 먼저 메뉴를 말씀해 주세요.";
pub const SESSION_LIMIT: &str =
    "대화가 너무 길어져서 처음부터 다시 시작할게요. 이용해 주셔서 감사합니다.";
pub const STT_APOLOGY: &str =
    "죄송해요, 잘 듣지 못했어요. 다시 한번 말씀해 주시겠어요?";
pub const QA_UNAVAILABLE: &str =
    "지금은 답변을 드리기 어려워요. 잠시 후 다시 시도해 주세요.";
pub const THANKS: &str = "이용해 주셔서 감사합니다.";

pub const TEXT_BIGGER: &str = "글자 크기를 키웠어요.";
pub const TEXT_SMALLER: &str = "글자 크기를 줄였어요.";
pub const TEXT_RESET: &str = "글자 크기를 원래대로 되돌렸어요.";
pub const BARCODE_HELP: &str =
    "바코드 스캐너는 화면 아래쪽에 있어요. 쿠폰이나 기프티콘의 바코드를 스캐너 불빛에 대시면 자동으로 인식됩니다.";

/// Fixed guidance for "where is the X button" while choosing a payment method
#[must_use]
pub const fn payment_button_guide(method: PaymentMethod) -> &'static str {
    match method {
        PaymentMethod::Card => "카드 결제 버튼은 결제 화면 오른쪽 아래에 있어요.",
        PaymentMethod::Cash => "현금 결제는 카운터에서 도와드려요. 직원 호출 버튼은 화면 왼쪽 위에 있어요.",
        PaymentMethod::MobilePay => "앱 결제 버튼은 결제 화면 가운데에 있어요. QR 코드를 화면에 비춰주세요.",
        PaymentMethod::Coupon => "쿠폰 버튼은 결제 화면 왼쪽 아래에 있어요. 바코드를 스캐너에 대시면 돼요.",
    }
}

/// Option phrases relevant to the category, in spoken order
fn option_phrases(category: Category, options: &OptionBundle) -> Vec<String> {
    let mut parts = Vec::new();
    match category {
        Category::Coffee => {
            if options.decaf == Some(true) {
                parts.push("디카페인".to_string());
            }
            if options.extra_shot > 0 {
                parts.push(format!("샷 {}회 추가", options.extra_shot));
            }
            if options.syrup {
                parts.push("시럽 추가".to_string());
            }
        }
        Category::Ade => {
            if let Some(sweetness) = options.sweetness {
                parts.push(sweetness.label().to_string());
            }
        }
        Category::Tea | Category::Dessert => {}
    }
    parts
}

/// "아이스 톨 아메리카노, 디카페인" style item label
#[must_use]
pub fn item_label(item: &CartItem) -> String {
    let mut head = Vec::new();
    if let Some(temp) = item.temp {
        head.push(temp.label().to_string());
    }
    if let Some(size) = item.size {
        head.push(size.label().to_string());
    }
    head.push(item.menu_name.clone());

    let mut label = head.join(" ");
    let opts = option_phrases(item.category, &item.options);
    if !opts.is_empty() {
        label.push_str(", ");
        label.push_str(&opts.join(", "));
    }
    label
}

/// Pre-commit summary question, asked once the last required slot is filled
#[must_use]
pub fn summary_question(item: &CartItem) -> String {
    format!(
        "{}로 주문할까요? 맞으면 '네'라고 말씀해 주세요.",
        item_label(item)
    )
}

/// Post-commit statement, spoken once the item lands in the cart
#[must_use]
pub fn cart_added(item: &CartItem, cart_len: usize) -> String {
    format!(
        "{}를 장바구니에 담았어요. 지금 {}개 담겨 있어요. 계속 주문하시겠어요, 결제하시겠어요?",
        item_label(item),
        cart_len
    )
}

/// Whole-cart summary with total, used for the order-level confirmation
#[must_use]
pub fn cart_summary(cart: &[CartItem], total: u32) -> String {
    if cart.is_empty() {
        return EMPTY_CART.to_string();
    }
    let lines: Vec<String> = cart.iter().map(item_label).collect();
    format!(
        "지금까지 {} 담으셨어요. 총 {total}원입니다. 이대로 결제할까요?",
        lines.join(", ")
    )
}

/// Removal acknowledgement
#[must_use]
pub fn removed_from_cart(menu_name: &str, cart_len: usize) -> String {
    format!(
        "{menu_name}를 장바구니에서 뺐어요. 지금 {cart_len}개 담겨 있어요. 계속 주문하시겠어요?"
    )
}

/// Final completion line with the amount charged
#[must_use]
pub fn order_done(method: PaymentMethod, total: u32) -> String {
    format!(
        "{}로 {total}원 결제가 완료되었습니다. 대기번호는 23번입니다. {THANKS}",
        method.label()
    )
}
