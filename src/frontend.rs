use crate::config::{default_phrases, parse_phrases, SiteConfig};
use crate::contact::{ContactMessage, THANK_YOU_MESSAGE};
use crate::counter::{parse_target, CounterGroup, ViewportBounds};
use crate::effects::{
    anchor_scroll_top, greeting_lines, hamburger_styles, ripple_css, skill_animation_delay, tilt_transform,
    timeline_hidden_styles, Particle, Rect, BODY_REVEAL_DELAY_MS, KEYFRAMES_CSS,
    REVEAL_ROOT_MARGIN, REVEAL_SELECTOR, REVEAL_THRESHOLD, RIPPLE_LIFETIME_MS,
    SOCIAL_HOVER_TRANSFORM, SOCIAL_REST_TRANSFORM, SOCIAL_SELECTOR, TILT_REST_TRANSFORM,
    TIMELINE_REVEALED_STYLES, TIMELINE_THRESHOLD,
};
use crate::log::{log_event, LogLevel};
use crate::schedule::{ReadyState, Scheduler, Task};
use crate::scroll::{NavLink, ScrollReactor, ScrollSnapshot, ScrollTargets, SectionPosition};
use crate::sink::DisplaySink;
use crate::typed_text;
use js_sys::{Array, Math, Reflect};
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    console, window, Document, Element, Event, EventTarget, HtmlElement,
    HtmlFormElement, HtmlImageElement, HtmlInputElement, HtmlTextAreaElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, MouseEvent, ScrollBehavior,
    ScrollToOptions, Window,
};

const PROGRESS_BAR_STYLE: &str = "position: fixed; top: 0; left: 0; width: 0%; height: 3px; \
    background: linear-gradient(90deg, #6C63FF 0%, #4CAF50 100%); z-index: 10000; \
    transition: width 0.1s ease;";
const PARTICLES_SELECTOR: &str = ".hero-particles";
const SECTION_SELECTOR: &str = ".section, .hero-section";
const STATS_SELECTOR: &str = ".about-stats";

struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn after(&self, delay_ms: u32, task: Task) {
        let Some(win) = window() else {
            return;
        };

        let callback = Closure::once_into_js(move || task());
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            i32::try_from(delay_ms).unwrap_or(i32::MAX),
        );
    }

    fn next_frame(&self, task: Task) {
        let Some(win) = window() else {
            return;
        };

        let callback = Closure::once_into_js(move || task());
        let _ = win.request_animation_frame(callback.unchecked_ref());
    }
}

impl DisplaySink for HtmlElement {
    fn set_text(&self, text: &str) {
        self.set_text_content(Some(text));
    }

    fn set_class(&self, class: &str, on: bool) {
        let _ = self.class_list().toggle_with_force(class, on);
    }

    fn set_style(&self, property: &str, value: &str) {
        let _ = self.style().set_property(property, value);
    }
}

fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let callback = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

fn html_element_by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    document.get_element_by_id(id)?.dyn_into::<HtmlElement>().ok()
}

fn query_html(document: &Document, selector: &str) -> Option<HtmlElement> {
    document
        .query_selector(selector)
        .ok()
        .flatten()?
        .dyn_into::<HtmlElement>()
        .ok()
}

fn query_all_html(root: &Element, selector: &str) -> Vec<HtmlElement> {
    let Ok(nodes) = root.query_selector_all(selector) else {
        return Vec::new();
    };

    (0..nodes.length())
        .filter_map(|index| nodes.get(index))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

fn document_query_all(document: &Document, selector: &str) -> Vec<HtmlElement> {
    match document.document_element() {
        Some(root) => query_all_html(&root, selector),
        None => Vec::new(),
    }
}

fn element_rect(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect {
        left: rect.left(),
        top: rect.top(),
        width: rect.width(),
        height: rect.height(),
    }
}

fn inner_height(win: &Window) -> f64 {
    win.inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(0.0)
}

fn scroll_to_top(win: &Window) {
    win.scroll_to_with_x_and_y(0.0, 0.0);
}

fn smooth_scroll_to(win: &Window, top: f64) {
    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    win.scroll_to_with_scroll_to_options(&options);
}

fn disable_scroll_restoration(win: &Window) {
    let Ok(history) = win.history() else {
        return;
    };

    let history_js: JsValue = history.into();
    let key = JsValue::from_str("scrollRestoration");
    if Reflect::has(&history_js, &key).unwrap_or(false) {
        let _ = Reflect::set(&history_js, &key, &JsValue::from_str("manual"));
    }
}

fn read_config(document: &Document) -> SiteConfig {
    match document.body() {
        Some(body) => SiteConfig::from_attributes(|name| body.get_attribute(name)),
        None => SiteConfig::default(),
    }
}

fn greet(contact_email: Option<&str>) {
    for (message, style) in greeting_lines(contact_email) {
        console::log_2(&JsValue::from_str(&message), &JsValue::from_str(style));
    }
}

fn report_missing(min_level: LogLevel, what: &str) {
    log_event(min_level, LogLevel::Debug, "element_missing", json!({ "element": what }));
}

fn on_page_loaded(win: &Window, document: &Document, config: &SiteConfig, scheduler: &Rc<dyn Scheduler>) {
    scroll_to_top(win);

    match html_element_by_id(document, "preloader") {
        Some(preloader) => scheduler.after(
            config.preloader_delay_ms,
            Box::new(move || preloader.set_class("hide", true)),
        ),
        None => report_missing(config.log_level, "#preloader"),
    }
}

fn on_dom_ready(win: &Window, document: &Document, log_level: LogLevel, scheduler: &Rc<dyn Scheduler>) {
    scroll_to_top(win);

    if let Some(image) = document
        .query_selector(".profile-img")
        .ok()
        .flatten()
        .and_then(|element| element.dyn_into::<HtmlImageElement>().ok())
    {
        let _ = image.class_list().add_1("loading");
        let loaded = image.clone();
        let _ = listen(&image, "load", move |_| {
            let _ = loaded.class_list().remove_1("loading");
        });
        if image.complete() {
            let _ = image.class_list().remove_1("loading");
        }
    }

    if let Some(body) = document.body() {
        scheduler.after(
            BODY_REVEAL_DELAY_MS,
            Box::new(move || body.set_style("opacity", "1")),
        );
    }

    log_event(log_level, LogLevel::Info, "page_ready", json!({}));
}

fn set_menu_open(menu: &HtmlElement, toggle: &HtmlElement, open: bool) {
    menu.set_class("active", open);
    let bars = query_all_html(toggle, "span");
    for (bar, (property, value)) in bars.iter().zip(hamburger_styles(open)) {
        bar.set_style(property, value);
    }
}

fn install_navigation(win: &Window, document: &Document, config: &SiteConfig) -> Result<(), JsValue> {
    let toggle = html_element_by_id(document, "navToggle");
    let menu = html_element_by_id(document, "navMenu");

    if let (Some(toggle), Some(menu)) = (toggle.clone(), menu.clone()) {
        let toggle_target = toggle.clone();
        listen(&toggle_target, "click", move |_| {
            let open = !menu.class_list().contains("active");
            set_menu_open(&menu, &toggle, open);
        })?;
    } else {
        report_missing(config.log_level, "#navToggle/#navMenu");
    }

    let nav_offset = config.nav_scroll_offset_px;
    for link in document_query_all(document, ".nav-link") {
        let win = win.clone();
        let document = document.clone();
        let toggle = toggle.clone();
        let menu = menu.clone();
        let href = link.get_attribute("href").unwrap_or_default();

        listen(&link, "click", move |event| {
            if let (Some(menu), Some(toggle)) = (&menu, &toggle) {
                set_menu_open(menu, toggle, false);
            }

            event.prevent_default();
            if let Some(section) = query_html(&document, &href) {
                let top = anchor_scroll_top(f64::from(section.offset_top()), nav_offset);
                smooth_scroll_to(&win, top);
            }
        })?;
    }

    if let Some(button) = html_element_by_id(document, "backToTop") {
        let win = win.clone();
        listen(&button, "click", move |_| smooth_scroll_to(&win, 0.0))?;
    }

    Ok(())
}

fn create_progress_bar(document: &Document) -> Option<HtmlElement> {
    let body = document.body()?;
    let bar = document
        .create_element("div")
        .ok()?
        .dyn_into::<HtmlElement>()
        .ok()?;
    bar.set_attribute("style", PROGRESS_BAR_STYLE).ok()?;
    body.append_child(&bar).ok()?;
    Some(bar)
}

fn stat_counters(document: &Document) -> Vec<(u64, HtmlElement)> {
    document_query_all(document, ".stat-number")
        .into_iter()
        .filter_map(|element| {
            let target = parse_target(element.get_attribute("data-target").as_deref())?;
            Some((target, element))
        })
        .collect()
}

fn scroll_snapshot(
    win: &Window,
    document: &Document,
    sections: &[HtmlElement],
) -> ScrollSnapshot {
    let (scroll_height, client_height) = document
        .document_element()
        .map(|root| (f64::from(root.scroll_height()), f64::from(root.client_height())))
        .unwrap_or((0.0, 0.0));

    ScrollSnapshot {
        scroll_y: win.scroll_y().unwrap_or(0.0),
        scroll_height,
        client_height,
        inner_height: inner_height(win),
        sections: sections
            .iter()
            .filter(|section| !section.id().is_empty())
            .map(|section| SectionPosition {
                id: section.id(),
                top: f64::from(section.offset_top()),
            })
            .collect(),
        stats_bounds: query_html(document, STATS_SELECTOR).map(|element| {
            let rect = element.get_bounding_client_rect();
            ViewportBounds {
                top: rect.top(),
                bottom: rect.bottom(),
            }
        }),
    }
}

fn install_scroll_reactor(
    win: &Window,
    document: &Document,
    config: &SiteConfig,
    scheduler: Rc<dyn Scheduler>,
) -> Result<(), JsValue> {
    let targets = ScrollTargets {
        navbar: html_element_by_id(document, "navbar"),
        nav_links: document_query_all(document, ".nav-link")
            .into_iter()
            .filter_map(|link| {
                Some(NavLink {
                    href: link.get_attribute("href")?,
                    sink: link,
                })
            })
            .collect(),
        progress_bar: create_progress_bar(document),
        back_to_top: html_element_by_id(document, "backToTop"),
        parallax_layers: document_query_all(document, PARTICLES_SELECTOR),
        counters: CounterGroup::new(stat_counters(document), config.counter),
    };

    let sections = document_query_all(document, SECTION_SELECTOR);
    let reactor = Rc::new(RefCell::new(ScrollReactor::new(config.scroll, targets, scheduler)));
    let log_level = config.log_level;

    let scroll_win = win.clone();
    let scroll_document = document.clone();
    listen(win, "scroll", move |_| {
        let snapshot = scroll_snapshot(&scroll_win, &scroll_document, &sections);
        let outcome = reactor.borrow_mut().on_scroll(&snapshot);
        if outcome.counters_started {
            log_event(
                log_level,
                LogLevel::Info,
                "counters_started",
                json!({ "scroll_y": snapshot.scroll_y }),
            );
        }
    })
}

fn start_typed_text(document: &Document, config: &SiteConfig, scheduler: Rc<dyn Scheduler>) {
    let element = query_html(document, ".typed-text");
    let phrases = element
        .as_ref()
        .and_then(|element| parse_phrases(element.get_attribute("data-phrases").as_deref()))
        .unwrap_or_else(default_phrases);
    let phrase_count = phrases.len();

    match typed_text::activate(element, phrases, config.typing, scheduler) {
        Some(_) => log_event(
            config.log_level,
            LogLevel::Info,
            "typed_text_started",
            json!({ "phrases": phrase_count }),
        ),
        None => log_event(
            config.log_level,
            LogLevel::Info,
            "typed_text_skipped",
            json!({ "reason": "missing .typed-text element" }),
        ),
    }
}

fn inject_keyframes(document: &Document) -> Result<(), JsValue> {
    let Some(head) = document.head() else {
        return Ok(());
    };

    let style = document.create_element("style")?;
    style.set_text_content(Some(KEYFRAMES_CSS));
    head.append_child(&style)?;
    Ok(())
}

fn spawn_particles(document: &Document, count: u32) -> Result<(), JsValue> {
    let Some(container) = query_html(document, PARTICLES_SELECTOR) else {
        return Ok(());
    };

    for _ in 0..count {
        let particle = Particle::from_samples([
            Math::random(),
            Math::random(),
            Math::random(),
            Math::random(),
            Math::random(),
        ]);
        let dot = document.create_element("div")?;
        dot.set_class_name("particle");
        dot.set_attribute("style", &particle.css_text())?;
        container.append_child(&dot)?;
    }
    Ok(())
}

/// Calls `on_visible` for each matching element as it scrolls into view.
/// With `once`, elements stop being observed after their first hit.
fn observe_intersections(
    document: &Document,
    selector: &str,
    threshold: f64,
    root_margin: Option<&str>,
    once: bool,
    on_visible: impl Fn(&Element) + 'static,
) -> Result<(), JsValue> {
    let elements = document_query_all(document, selector);
    if elements.is_empty() {
        return Ok(());
    }

    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if !entry.is_intersecting() {
                    continue;
                }

                let target = entry.target();
                on_visible(&target);
                if once {
                    observer.unobserve(&target);
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    if let Some(root_margin) = root_margin {
        options.set_root_margin(root_margin);
    }

    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();

    for element in &elements {
        observer.observe(element);
    }
    Ok(())
}

fn install_reveal_effects(document: &Document) -> Result<(), JsValue> {
    observe_intersections(
        document,
        REVEAL_SELECTOR,
        REVEAL_THRESHOLD,
        Some(REVEAL_ROOT_MARGIN),
        true,
        |element| {
            let _ = element.class_list().add_1("fade-in");
        },
    )?;

    for (index, item) in document_query_all(document, ".skill-item").iter().enumerate() {
        item.set_style("animation-delay", &skill_animation_delay(index));
    }

    for (index, item) in document_query_all(document, ".timeline-item").iter().enumerate() {
        for (property, value) in timeline_hidden_styles(index) {
            item.set_style(property, &value);
        }
    }
    observe_intersections(
        document,
        ".timeline-item",
        TIMELINE_THRESHOLD,
        None,
        false,
        |element| {
            if let Some(item) = element.dyn_ref::<HtmlElement>() {
                for (property, value) in TIMELINE_REVEALED_STYLES {
                    item.set_style(property, value);
                }
            }
        },
    )?;

    observe_intersections(document, "img[data-src]", 0.0, None, true, |image| {
        if let Some(source) = image.get_attribute("data-src") {
            let _ = image.set_attribute("src", &source);
            let _ = image.remove_attribute("data-src");
        }
    })
}

fn install_pointer_effects(document: &Document, scheduler: Rc<dyn Scheduler>) -> Result<(), JsValue> {
    for card in document_query_all(document, ".project-card") {
        let moved = card.clone();
        listen(&card, "mousemove", move |event| {
            if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                let transform = tilt_transform(
                    element_rect(&moved),
                    f64::from(mouse.client_x()),
                    f64::from(mouse.client_y()),
                );
                moved.set_style("transform", &transform);
            }
        })?;

        let left = card.clone();
        listen(&card, "mouseleave", move |_| {
            left.set_style("transform", TILT_REST_TRANSFORM);
        })?;
    }

    for link in document_query_all(document, SOCIAL_SELECTOR) {
        let entered = link.clone();
        listen(&link, "mouseenter", move |_| {
            entered.set_style("transform", SOCIAL_HOVER_TRANSFORM);
        })?;

        let left = link.clone();
        listen(&link, "mouseleave", move |_| {
            left.set_style("transform", SOCIAL_REST_TRANSFORM);
        })?;
    }

    for button in document_query_all(document, ".btn") {
        let clicked = button.clone();
        let scheduler = scheduler.clone();
        listen(&button, "click", move |event| {
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let Some(document) = clicked.owner_document() else {
                return;
            };
            let Ok(ripple) = document.create_element("span") else {
                return;
            };

            let css = ripple_css(
                element_rect(&clicked),
                f64::from(mouse.client_x()),
                f64::from(mouse.client_y()),
            );
            if ripple.set_attribute("style", &css).is_err() || clicked.append_child(&ripple).is_err() {
                return;
            }
            scheduler.after(RIPPLE_LIFETIME_MS, Box::new(move || ripple.remove()));
        })?;
    }

    Ok(())
}

fn field_value(document: &Document, id: &str) -> Option<String> {
    let element = document.get_element_by_id(id)?;
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        return Some(input.value());
    }
    element
        .dyn_ref::<HtmlTextAreaElement>()
        .map(|area| area.value())
}

fn install_contact_form(win: &Window, document: &Document, log_level: LogLevel) -> Result<(), JsValue> {
    let Some(form) = document
        .get_element_by_id("contactForm")
        .and_then(|element| element.dyn_into::<HtmlFormElement>().ok())
    else {
        report_missing(log_level, "#contactForm");
        return Ok(());
    };

    let win = win.clone();
    let document = document.clone();
    let submitted = form.clone();
    listen(&form, "submit", move |event| {
        event.prevent_default();

        let message = ContactMessage::from_fields(|id| field_value(&document, id));
        log_event(log_level, LogLevel::Info, "contact_form_submitted", message.log_fields());

        let _ = win.alert_with_message(THANK_YOU_MESSAGE);
        submitted.reset();
    })
}

fn start() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("missing window"))?;
    let document = win
        .document()
        .ok_or_else(|| JsValue::from_str("missing document"))?;
    let config = read_config(&document);
    let scheduler: Rc<dyn Scheduler> = Rc::new(BrowserScheduler);

    log_event(
        config.log_level,
        LogLevel::Debug,
        "config_loaded",
        json!({
            "typing_ms": config.typing.typing_ms,
            "deleting_ms": config.typing.deleting_ms,
            "particle_count": config.particle_count,
        }),
    );

    greet(config.contact_email.as_deref());
    disable_scroll_restoration(&win);
    scroll_to_top(&win);

    let pageshow_win = win.clone();
    listen(&win, "pageshow", move |_| scroll_to_top(&pageshow_win))?;

    // The module may be instantiated after either event has already fired.
    let ready_state = ReadyState::parse(&document.ready_state());
    if !ready_state.dom_content_loaded_fired() {
        let ready_win = win.clone();
        let ready_document = document.clone();
        let ready_scheduler = scheduler.clone();
        let log_level = config.log_level;
        listen(&document, "DOMContentLoaded", move |_| {
            on_dom_ready(&ready_win, &ready_document, log_level, &ready_scheduler);
        })?;
    } else {
        on_dom_ready(&win, &document, config.log_level, &scheduler);
    }

    if ready_state.load_fired() {
        on_page_loaded(&win, &document, &config, &scheduler);
    } else {
        let load_win = win.clone();
        let load_document = document.clone();
        let load_config = config.clone();
        let load_scheduler = scheduler.clone();
        listen(&win, "load", move |_| {
            on_page_loaded(&load_win, &load_document, &load_config, &load_scheduler);
        })?;
    }

    install_navigation(&win, &document, &config)?;
    install_scroll_reactor(&win, &document, &config, scheduler.clone())?;
    start_typed_text(&document, &config, scheduler.clone());
    inject_keyframes(&document)?;
    spawn_particles(&document, config.particle_count)?;
    install_reveal_effects(&document)?;
    install_pointer_effects(&document, scheduler)?;
    install_contact_form(&win, &document, config.log_level)?;
    Ok(())
}

pub fn run() {
    if let Err(error) = start() {
        console::error_2(&JsValue::from_str("portfolio script failed to start:"), &error);
    }
}
