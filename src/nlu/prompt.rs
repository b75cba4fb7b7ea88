//! Fixed prompts and few-shot examples for the enhanced parsers
//!
//! Each spec pins the exact JSON shape the model must emit. The parsers in
//! [`crate::nlu::parser`] deserialize that shape directly; anything else
//! counts as "no answer."

use crate::nlu::Exchange;

/// A fixed system prompt plus its few-shot examples
#[derive(Debug, Clone, Copy)]
pub struct PromptSpec {
    pub system: &'static str,
    pub examples: &'static [Exchange],
}

/// Option-bundle extraction (coffee/ade options)
pub const OPTIONS: PromptSpec = PromptSpec {
    system: "너는 카페 키오스크의 주문 분석기야. 사용자 발화에서 음료 옵션만 추출해서 \
             JSON 한 개로 답해. 키: extra_shot(0-3 정수), syrup(불리언), \
             decaf(불리언 또는 null), sweetness(\"low\"/\"normal\"/\"high\" 또는 null). \
             언급되지 않은 키는 기본값(0, false, null)으로 둬. JSON 외 다른 텍스트 금지.",
    examples: &[
        Exchange {
            user: "디카페인으로 하고 샷 하나 추가해 주세요",
            assistant: r#"{"extra_shot": 1, "syrup": false, "decaf": true, "sweetness": null}"#,
        },
        Exchange {
            user: "덜 달게 해주세요",
            assistant: r#"{"extra_shot": 0, "syrup": false, "decaf": null, "sweetness": "low"}"#,
        },
        Exchange {
            user: "바닐라 시럽 넣고 샷 두 번이요",
            assistant: r#"{"extra_shot": 2, "syrup": true, "decaf": null, "sweetness": null}"#,
        },
    ],
};

/// Combined remove-then-add cart edit
pub const CART_EDIT: PromptSpec = PromptSpec {
    system: "너는 카페 키오스크의 장바구니 편집 분석기야. 사용자 발화에서 빼려는 메뉴와 \
             대신 담으려는 메뉴를 추출해서 JSON 한 개로 답해. \
             키: remove(메뉴 이름 또는 null), add(메뉴 이름 또는 null). \
             JSON 외 다른 텍스트 금지.",
    examples: &[
        Exchange {
            user: "아메리카노 빼고 카페라떼로 바꿔주세요",
            assistant: r#"{"remove": "아메리카노", "add": "카페라떼"}"#,
        },
        Exchange {
            user: "레몬에이드는 취소해 주세요",
            assistant: r#"{"remove": "레몬에이드", "add": null}"#,
        },
        Exchange {
            user: "치즈케이크도 추가요",
            assistant: r#"{"remove": null, "add": "치즈케이크"}"#,
        },
    ],
};

/// "Where is this button" UI help
pub const UI_HELP: PromptSpec = PromptSpec {
    system: "너는 카페 키오스크 화면 안내 도우미야. 사용자가 버튼이나 기능의 위치를 물으면 \
             짧은 한국어 답변과 해당 UI 요소 id를 JSON 한 개로 답해. \
             키: answer(문자열), element(\"PAY_BUTTON\"/\"MENU_TAB\"/\"CART_BUTTON\"/\
             \"COUPON_BUTTON\"/\"CALL_STAFF\" 또는 null). JSON 외 다른 텍스트 금지.",
    examples: &[
        Exchange {
            user: "결제 버튼이 어디에 있어요?",
            assistant: r#"{"answer": "결제 버튼은 화면 오른쪽 아래에 있어요.", "element": "PAY_BUTTON"}"#,
        },
        Exchange {
            user: "장바구니는 어디서 봐요?",
            assistant: r#"{"answer": "장바구니 버튼은 화면 위쪽 오른쪽에 있어요.", "element": "CART_BUTTON"}"#,
        },
    ],
};

/// General café knowledge questions
pub const GENERAL_QA: PromptSpec = PromptSpec {
    system: "너는 카페 키오스크 도우미야. 사용자가 일반 지식이나 메뉴 설명을 물으면 \
             친절하고 짧게 한국어로 답하고, JSON 한 개로 답해. 키: answer(문자열). \
             JSON 외 다른 텍스트 금지.",
    examples: &[
        Exchange {
            user: "아메리카노랑 라떼 차이가 뭐야?",
            assistant: r#"{"answer": "아메리카노는 에스프레소에 물을 더한 커피고, 라떼는 에스프레소에 우유를 더해 더 부드러워요."}"#,
        },
        Exchange {
            user: "디카페인도 카페인이 있어?",
            assistant: r#"{"answer": "디카페인 커피에도 아주 적은 양의 카페인은 남아 있어요."}"#,
        },
    ],
};
