//! End-to-end conversation scenarios against the dispatcher

use kiosk_gateway::dialogue::{Dispatcher, SlotStore, Step, script};
use kiosk_gateway::order::{DineType, PaymentMethod, Size, Sweetness};

async fn drive(dispatcher: &Dispatcher, store: &mut SlotStore, utterances: &[&str]) {
    for text in utterances {
        dispatcher.handle_turn(store, text).await;
    }
}

#[tokio::test]
async fn dine_in_ade_with_sweetness_pays_by_coupon() {
    let dispatcher = Dispatcher::new();
    let mut store = SlotStore::new();

    drive(
        &dispatcher,
        &mut store,
        &[
            "주문 시작할게요",
            "매장에서 먹고 갈게요",
            "청포도에이드 주세요",
            "그란데로요",
            "덜 달게 해주세요",
            "네 맞아요",
        ],
    )
    .await;
    assert_eq!(store.step, Step::MenuItem);
    assert_eq!(store.cart.len(), 1);
    assert_eq!(store.cart[0].size, Some(Size::Grande));
    assert_eq!(store.cart[0].options.sweetness, Some(Sweetness::Low));
    assert_eq!(store.dine_type, Some(DineType::DineIn));

    drive(&dispatcher, &mut store, &["결제할게요", "네"]).await;
    assert_eq!(store.step, Step::Payment);

    let turn = dispatcher.handle_turn(&mut store, "쿠폰으로 할게요").await;
    assert_eq!(store.step, Step::Coupon);
    assert_eq!(turn.response, script::COUPON_PROMPT);

    let turn = dispatcher.handle_turn(&mut store, "바코드 찍었어요").await;
    assert_eq!(store.step, Step::Done);
    assert_eq!(
        turn.payload.expect("payload").payment_method,
        Some(PaymentMethod::Coupon)
    );
}

#[tokio::test]
async fn every_step_of_the_coffee_path_is_visited() {
    let dispatcher = Dispatcher::new();
    let mut store = SlotStore::new();
    let mut visited = vec![store.step];

    for text in [
        "주문할게요",
        "포장할게요",
        "바닐라라떼 주세요",
        "따뜻하게요",
        "벤티로요",
        "시럽 추가해 주세요",
        "네",
        "결제할게요",
        "네",
        "카드요",
        "됐어요",
    ] {
        dispatcher.handle_turn(&mut store, text).await;
        visited.push(store.step);
    }

    for step in [
        Step::Greeting,
        Step::DineType,
        Step::MenuItem,
        Step::Temp,
        Step::Size,
        Step::Options,
        Step::Confirm,
        Step::Payment,
        Step::Card,
        Step::Done,
    ] {
        assert!(visited.contains(&step), "never visited {step:?}");
    }
    assert_eq!(store.cart[0].menu_id, "COFFEE_VANILLA_LATTE");
    assert!(store.cart[0].options.syrup);
}

#[tokio::test]
async fn back_from_options_reopens_the_size_question() {
    let dispatcher = Dispatcher::new();
    let mut store = SlotStore::new();
    drive(
        &dispatcher,
        &mut store,
        &["주문할게요", "포장이요", "아이스 카페라떼", "그란데"],
    )
    .await;
    assert_eq!(store.step, Step::Options);

    let turn = dispatcher.handle_turn(&mut store, "이전 단계로요").await;

    assert_eq!(store.step, Step::Size);
    assert!(store.size.is_none());
    assert_eq!(turn.response, script::ASK_SIZE);

    // a new size flows straight back into the options question
    dispatcher.handle_turn(&mut store, "벤티로 바꿀게요").await;
    assert_eq!(store.step, Step::Options);
    assert_eq!(store.size, Some(Size::Venti));
}

#[tokio::test]
async fn second_order_starts_clean_after_completion() {
    let dispatcher = Dispatcher::new();
    let mut store = SlotStore::new();
    drive(
        &dispatcher,
        &mut store,
        &["주문할게요", "포장이요", "마카롱 담아줘", "현금으로 결제할게요"],
    )
    .await;
    assert_eq!(store.step, Step::Done);

    // first utterance after completion restarts the conversation
    let turn = dispatcher.handle_turn(&mut store, "또 주문하려고요").await;
    assert_eq!(turn.response, script::GREETING);
    assert!(store.cart.is_empty());
    assert!(store.dine_type.is_none());
    assert!(store.payment_method.is_none());

    drive(&dispatcher, &mut store, &["주문할게요", "매장이요", "얼그레이티 주세요"]).await;
    assert_eq!(store.step, Step::Temp);
    assert_eq!(store.menu_id(), Some("TEA_EARL_GREY"));
}

#[tokio::test]
async fn tangents_leave_the_order_untouched() {
    let dispatcher = Dispatcher::new();
    let mut store = SlotStore::new();
    drive(
        &dispatcher,
        &mut store,
        &["주문할게요", "포장이요", "아이스 아메리카노", "톨"],
    )
    .await;
    assert_eq!(store.step, Step::Options);
    let before = store.snapshot();

    for tangent in [
        "글씨 좀 키워주세요",
        "바코드는 어떻게 쓰는 거예요?",
        "원두는 어떤 걸 쓰나요?",
    ] {
        dispatcher.handle_turn(&mut store, tangent).await;
        assert_eq!(store.step, before.step, "after {tangent:?}");
        assert_eq!(store.menu_id(), before.menu_id.as_deref());
        assert_eq!(store.size, before.size);
    }
}

#[tokio::test]
async fn removing_one_of_two_items_keeps_the_other() {
    let dispatcher = Dispatcher::new();
    let mut store = SlotStore::new();
    drive(
        &dispatcher,
        &mut store,
        &[
            "주문할게요",
            "포장이요",
            "치즈케이크 담아줘",
            "마카롱 담아줘",
        ],
    )
    .await;
    assert_eq!(store.cart.len(), 2);

    let turn = dispatcher.handle_turn(&mut store, "치즈케이크는 빼주세요").await;

    assert_eq!(store.cart.len(), 1);
    assert_eq!(store.cart[0].menu_id, "DESSERT_MACARON");
    let payload = turn.payload.expect("payload");
    assert!(payload.remove_from_cart);
    assert_eq!(payload.removed_menu_id.as_deref(), Some("DESSERT_CHEESECAKE"));

    // the surviving item still pays out normally
    let turn = dispatcher.handle_turn(&mut store, "카드로 결제할게요").await;
    assert_eq!(store.step, Step::Card);
    assert!(!turn.payload.expect("payload").remove_from_cart);
}
