//! Turn Dispatcher: the conversation state machine
//!
//! One call per turn: current store + raw utterance in, response text and
//! updated backend payload out. Cross-cutting intents are tested in a fixed
//! priority order before any state-local handling:
//!
//! 1. back/cancel navigation
//! 2. explicit pay intent (menu hub and confirm states only)
//! 3. "where is X" UI-location questions
//! 4. general questions and deterministic utility intents
//! 5. state handling
//!
//! Interceptions leave `step` and the slots untouched except for the
//! designed back/pay jumps, so an order survives any mid-order tangent.

use std::sync::Arc;

use crate::dialogue::parse::{self, TextSizeAction};
use crate::dialogue::payload::OrderPayload;
use crate::dialogue::script;
use crate::dialogue::slots::{OrderSnapshot, SlotStore, StoredTurn};
use crate::dialogue::state::Step;
use crate::menu::{self, Category, pricing};
use crate::nlu::parser::{CartEdit, LlmParser, OrElse, RuleParser, SlotParse};
use crate::nlu::qa::QaService;
use crate::nlu::{LanguageModel, prompt};
use crate::order::{OptionBundle, PaymentMethod};

/// Result of one processed turn
#[derive(Debug, Clone)]
pub struct Turn {
    pub response: String,
    pub snapshot: OrderSnapshot,
    pub payload: Option<OrderPayload>,
    /// UI element id from a location answer, for the client to highlight
    pub ui_element: Option<String>,
}

/// The state machine core
///
/// Stateless itself; all conversation state lives in the per-session
/// [`SlotStore`]. The optional language model upgrades option parsing and
/// cart edits and backs the QA tangents; without it everything degrades to
/// the rule-based parsers.
#[derive(Default)]
pub struct Dispatcher {
    nlu: Option<Arc<dyn LanguageModel>>,
}

impl Dispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self { nlu: None }
    }

    #[must_use]
    pub fn with_language_model(model: Arc<dyn LanguageModel>) -> Self {
        Self { nlu: Some(model) }
    }

    /// Process one turn
    pub async fn handle_turn(&self, store: &mut SlotStore, text: &str) -> Turn {
        let before = store.step;
        let (response, ui_element) = self.next_response(store, text).await;
        tracing::debug!(from = ?before, to = ?store.step, "turn handled");

        let payload = OrderPayload::from_store(store);
        store.last_response = Some(StoredTurn {
            response_text: response.clone(),
            payload: payload.clone(),
        });

        Turn {
            response,
            snapshot: store.snapshot(),
            payload,
            ui_element,
        }
    }

    async fn next_response(&self, store: &mut SlotStore, text: &str) -> (String, Option<String>) {
        // terminal state restarts before anything else gets a look
        if store.step.is_done() {
            store.reset();
            return (script::GREETING.to_string(), None);
        }

        if parse::parse_back(text) {
            return (go_back(store), None);
        }

        if parse::parse_pay_intent(text) && matches!(store.step, Step::MenuItem | Step::Confirm) {
            return (pay_shortcut(store, text), None);
        }

        if parse::parse_ui_location(text) {
            if store.step == Step::Payment {
                if let Some(method) = parse::parse_payment(text) {
                    return (script::payment_button_guide(method).to_string(), None);
                }
            }
            return self.ui_help(text).await;
        }

        if let Some(action) = parse::parse_text_size(text) {
            let line = match action {
                TextSizeAction::Enlarge => script::TEXT_BIGGER,
                TextSizeAction::Shrink => script::TEXT_SMALLER,
                TextSizeAction::Reset => script::TEXT_RESET,
            };
            return (line.to_string(), None);
        }
        if parse::parse_barcode_help(text) {
            return (script::BARCODE_HELP.to_string(), None);
        }
        if parse::parse_general_question(text) {
            return (self.general_answer(text).await, None);
        }

        let response = match store.step {
            Step::Greeting => greeting(store, text),
            Step::DineType => self.dine_type(store, text).await,
            Step::MenuItem => self.menu_item(store, text).await,
            Step::Temp => temp(store, text),
            Step::Size => size(store, text),
            Step::Options => self.options(store, text).await,
            Step::Confirm => confirm(store, text),
            Step::Payment => payment(store, text),
            Step::Card => card(store, text),
            Step::Coupon => coupon(store, text),
            // unreachable: handled above, but the machine must answer something
            Step::Done => {
                store.reset();
                script::GREETING.to_string()
            }
        };
        (response, None)
    }

    async fn dine_type(&self, store: &mut SlotStore, text: &str) -> String {
        let Some(dine_type) = parse::parse_dine_type(text) else {
            return script::REPROMPT_DINE_TYPE.to_string();
        };
        store.dine_type = Some(dine_type);
        store.step = Step::MenuItem;

        // a menu spoken in the same breath starts item configuration at once
        if menu::lookup(text, None).is_some() {
            return self.menu_item(store, text).await;
        }
        script::ASK_MENU.to_string()
    }

    async fn menu_item(&self, store: &mut SlotStore, text: &str) -> String {
        if let Some(response) = self.try_cart_edit(store, text).await {
            return response;
        }

        let Some((category, item)) = menu::lookup(text, store.category) else {
            return script::MENU_NOT_FOUND.to_string();
        };
        store.choose_menu(category, item.id, item.name);

        // absorb slots spoken together with the menu name
        if matches!(category, Category::Coffee | Category::Tea) {
            if let Some(t) = parse::parse_temp(text) {
                store.temp = Some(t);
            }
        }
        if category != Category::Dessert {
            if let Some(s) = parse::parse_size(text) {
                store.size = Some(s);
            }
        }

        if category == Category::Dessert && parse::parse_add_to_cart(text) {
            // dessert with explicit cart phrasing skips the confirm question
            if let Some(committed) = store.commit_item() {
                store.step = Step::MenuItem;
                return script::cart_added(&committed, store.cart.len());
            }
        }

        advance_item(store)
    }

    async fn options(&self, store: &mut SlotStore, text: &str) -> String {
        let parsed = self.parse_options_enhanced(text).await;

        if let Some(bundle) = parsed {
            store.merge_options(&bundle);
        } else if !parse::parse_no_options(text) {
            return ask_options(store);
        }

        store.step = Step::Confirm;
        store.current_item().map_or_else(
            || {
                // options without an item cannot happen via the graph
                store.step = Step::MenuItem;
                script::ASK_MENU.to_string()
            },
            |item| script::summary_question(&item),
        )
    }

    /// Enhanced-then-rule option parsing, per the fallback contract
    async fn parse_options_enhanced(&self, text: &str) -> Option<OptionBundle> {
        let parsed = match &self.nlu {
            Some(model) => {
                OrElse(
                    LlmParser::<OptionBundle>::new(model.clone(), prompt::OPTIONS),
                    RuleParser(parse::parse_options),
                )
                .parse(text)
                .await
            }
            None => RuleParser(parse::parse_options).parse(text).await,
        };
        // an all-default bundle carries no signal
        parsed.filter(|bundle| !bundle.is_empty())
    }

    /// Cart edits: pure removal, or LLM-parsed remove+add in one utterance
    async fn try_cart_edit(&self, store: &mut SlotStore, text: &str) -> Option<String> {
        if store.cart.is_empty() || !parse::has_remove_keyword(text) {
            return None;
        }

        let edit = match &self.nlu {
            Some(model) => {
                OrElse(
                    LlmParser::<CartEdit>::new(model.clone(), prompt::CART_EDIT),
                    RuleParser(rule_cart_edit),
                )
                .parse(text)
                .await
            }
            None => rule_cart_edit(text),
        }?;

        let remove_name = edit.remove.as_deref()?;
        let (_, target) = menu::lookup(remove_name, None)?;
        let Some(removed) = store.remove_cart_item(target.id) else {
            return Some(format!(
                "{}는 장바구니에 없어요. {}",
                target.name,
                script::ASK_MENU
            ));
        };
        let mut response = script::removed_from_cart(&removed.menu_name, store.cart.len());

        if let Some(add_name) = edit.add.as_deref() {
            if let Some((category, item)) = menu::lookup(add_name, None) {
                store.choose_menu(category, item.id, item.name);
                response.push(' ');
                response.push_str(&advance_item(store));
            }
        }
        Some(response)
    }

    async fn ui_help(&self, text: &str) -> (String, Option<String>) {
        match &self.nlu {
            Some(model) => {
                let help = QaService::new(model.clone()).ui_help(text).await;
                (help.answer, help.element)
            }
            None => (script::QA_UNAVAILABLE.to_string(), None),
        }
    }

    async fn general_answer(&self, text: &str) -> String {
        match &self.nlu {
            Some(model) => QaService::new(model.clone()).general_answer(text).await,
            None => script::QA_UNAVAILABLE.to_string(),
        }
    }
}

fn greeting(store: &mut SlotStore, text: &str) -> String {
    if parse::parse_start_cue(text) {
        store.step = Step::DineType;
        return script::ASK_DINE_TYPE.to_string();
    }
    script::GREETING.to_string()
}

fn temp(store: &mut SlotStore, text: &str) -> String {
    let Some(parsed) = parse::parse_temp(text) else {
        return script::ASK_TEMP.to_string();
    };
    store.temp = Some(parsed);
    advance_item(store)
}

fn size(store: &mut SlotStore, text: &str) -> String {
    let Some(parsed) = parse::parse_size(text) else {
        return script::ASK_SIZE.to_string();
    };
    store.size = Some(parsed);
    advance_item(store)
}

fn confirm(store: &mut SlotStore, text: &str) -> String {
    if store.menu().is_some() {
        // item-level confirmation
        if parse::parse_add_to_cart(text) || parse::parse_yes_no(text) == Some(true) {
            return match store.commit_item() {
                Some(committed) => {
                    store.step = Step::MenuItem;
                    script::cart_added(&committed, store.cart.len())
                }
                None => {
                    store.step = Step::MenuItem;
                    script::ASK_MENU.to_string()
                }
            };
        }
        if parse::parse_yes_no(text) == Some(false) {
            store.clear_item();
            store.step = Step::MenuItem;
            return format!("알겠습니다. {}", script::ASK_MENU);
        }
        return match store.current_item() {
            Some(item) => format!("{} {}", script::summary_question(&item), script::REPROMPT_YES_NO),
            None => script::REPROMPT_YES_NO.to_string(),
        };
    }

    // order-level confirmation, entered via the pay shortcut
    match parse::parse_yes_no(text) {
        Some(true) => {
            store.step = Step::Payment;
            script::ASK_PAYMENT.to_string()
        }
        Some(false) => {
            store.step = Step::MenuItem;
            script::ASK_MENU.to_string()
        }
        None => script::cart_summary(&store.cart, pricing::cart_total(&store.cart)),
    }
}

fn payment(store: &mut SlotStore, text: &str) -> String {
    match parse::parse_payment(text) {
        Some(method) => begin_payment(store, method),
        None => script::ASK_PAYMENT.to_string(),
    }
}

fn card(store: &mut SlotStore, text: &str) -> String {
    if parse::parse_card_done(text) {
        store.step = Step::Done;
        return script::order_done(PaymentMethod::Card, pricing::cart_total(&store.cart));
    }
    script::CARD_PROMPT.to_string()
}

fn coupon(store: &mut SlotStore, text: &str) -> String {
    if parse::parse_coupon_done(text) {
        store.step = Step::Done;
        return script::order_done(PaymentMethod::Coupon, pricing::cart_total(&store.cart));
    }
    script::COUPON_PROMPT.to_string()
}

/// Route to the next missing slot of the in-progress item
fn advance_item(store: &mut SlotStore) -> String {
    let Some(category) = store.category else {
        store.step = Step::MenuItem;
        return script::ASK_MENU.to_string();
    };

    if matches!(category, Category::Coffee | Category::Tea) && store.temp.is_none() {
        store.step = Step::Temp;
        return script::ASK_TEMP.to_string();
    }
    if category != Category::Dessert && store.size.is_none() {
        store.step = Step::Size;
        return script::ASK_SIZE.to_string();
    }
    match category {
        Category::Coffee | Category::Ade => {
            store.step = Step::Options;
            ask_options(store)
        }
        Category::Tea | Category::Dessert => {
            store.step = Step::Confirm;
            store.current_item().map_or_else(
                || script::ASK_MENU.to_string(),
                |item| script::summary_question(&item),
            )
        }
    }
}

fn ask_options(store: &SlotStore) -> String {
    match store.category {
        Some(Category::Ade) => script::ASK_OPTIONS_ADE.to_string(),
        _ => script::ASK_OPTIONS_COFFEE.to_string(),
    }
}

/// State-specific backward transition
fn go_back(store: &mut SlotStore) -> String {
    match store.step {
        Step::Greeting => script::GREETING.to_string(),
        Step::DineType => script::REPROMPT_DINE_TYPE.to_string(),
        Step::MenuItem => script::ASK_MENU.to_string(),
        Step::Temp => {
            store.clear_item();
            store.step = Step::MenuItem;
            script::ASK_MENU.to_string()
        }
        Step::Size => {
            if matches!(store.category, Some(Category::Coffee | Category::Tea)) {
                store.temp = None;
                store.step = Step::Temp;
                script::ASK_TEMP.to_string()
            } else {
                store.clear_item();
                store.step = Step::MenuItem;
                script::ASK_MENU.to_string()
            }
        }
        Step::Options => {
            store.size = None;
            store.step = Step::Size;
            script::ASK_SIZE.to_string()
        }
        Step::Confirm => {
            store.clear_item();
            store.step = Step::MenuItem;
            script::ASK_MENU.to_string()
        }
        Step::Payment => {
            store.step = Step::MenuItem;
            script::ASK_MENU.to_string()
        }
        Step::Card | Step::Coupon => {
            store.payment_method = None;
            store.step = Step::Payment;
            script::ASK_PAYMENT.to_string()
        }
        Step::Done => {
            store.reset();
            script::GREETING.to_string()
        }
    }
}

/// Pay-intent shortcut from the menu hub or a confirm state
fn pay_shortcut(store: &mut SlotStore, text: &str) -> String {
    // a fully-specified pending item rides along into the cart
    if store.step == Step::Confirm && store.menu().is_some() {
        store.commit_item();
    }
    if store.cart.is_empty() {
        store.step = Step::MenuItem;
        return script::EMPTY_CART.to_string();
    }

    // method named in the same utterance: no need to ask again
    if let Some(method) = parse::parse_payment(text) {
        return begin_payment(store, method);
    }

    match store.step {
        Step::MenuItem => {
            store.step = Step::Confirm;
            script::cart_summary(&store.cart, pricing::cart_total(&store.cart))
        }
        _ => {
            store.step = Step::Payment;
            script::ASK_PAYMENT.to_string()
        }
    }
}

fn begin_payment(store: &mut SlotStore, method: PaymentMethod) -> String {
    store.payment_method = Some(method);
    match method {
        PaymentMethod::Card => {
            store.step = Step::Card;
            script::CARD_PROMPT.to_string()
        }
        PaymentMethod::Coupon => {
            store.step = Step::Coupon;
            script::COUPON_PROMPT.to_string()
        }
        PaymentMethod::Cash | PaymentMethod::MobilePay => {
            store.step = Step::Done;
            script::order_done(method, pricing::cart_total(&store.cart))
        }
    }
}

/// Rule-based fallback for cart edits: resolves pure removals only
fn rule_cart_edit(text: &str) -> Option<CartEdit> {
    let (_, item) = parse::parse_remove_intent(text)?;
    Some(CartEdit {
        remove: Some(item.name.to_string()),
        add: None,
    })
}
