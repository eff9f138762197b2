use std::time::{Duration, Instant};

use perch::components::{
    STICK_END_CLASS, STICK_START_CLASS, StickyHeader, StickyHeaderConfig, StickyMode,
    StickyRegion, StickyState,
};
use perchdom::{
    DeclarationEnvironment, Element, Length, Platform, Position, Rect, Scrollable, StyleSet,
    Transform, VendorPrefix, ZIndex,
};

// Region spans 100..400, header is 20 tall: stuck between 100 and 380.
const REGION_TOP: i32 = 100;
const THRESHOLD: i32 = 380;

struct Page {
    container: Element,
    scrollable: Scrollable,
    region: Element,
    header: Element,
}

impl Page {
    fn new() -> Self {
        let header = Element::box_()
            .id("header")
            .style(
                StyleSet::new()
                    .position(Position::Relative)
                    .width(Length::Px(200)),
            )
            .offset(Rect::new(0, 0, 200, 20));
        let region = Element::box_()
            .id("region")
            .bounds(Rect::new(0, REGION_TOP, 200, 300))
            .child(header.clone());
        let container = Element::box_()
            .id("container")
            .offset(Rect::new(0, 0, 400, 600))
            .client_width(400)
            .child(region.clone());
        let scrollable = Scrollable::new(container.clone());
        Self {
            container,
            scrollable,
            region,
            header,
        }
    }

    fn scroll_to(&self, position: i32) {
        self.container
            .set_offset_rect(Rect::new(0, position, 400, 600));
    }

    fn attach(&self, config: StickyHeaderConfig) -> StickyHeader {
        StickyHeader::attach(self.header.clone(), &self.scrollable, config, &manual_platform())
    }
}

fn manual_platform() -> Platform {
    Platform::new(DeclarationEnvironment::without_sticky())
}

fn expected_state(position: i32) -> StickyState {
    if position >= THRESHOLD {
        StickyState::Unstuck
    } else if position > REGION_TOP {
        StickyState::Stuck
    } else {
        StickyState::Reset
    }
}

// ============================================================================
// Attach
// ============================================================================

#[test]
fn test_attach_manual_captures_original() {
    let page = Page::new();
    let original = page.header.computed_style();
    let header = page.attach(StickyHeaderConfig::new());

    assert_eq!(header.mode(), StickyMode::Manual);
    assert_eq!(header.state(), StickyState::Reset);
    assert_eq!(header.original_style(), Some(original));
    assert_eq!(header.region(), Some(page.region.clone()));
    assert_eq!(header.region_top(), REGION_TOP);
    assert_eq!(header.region_bottom_threshold(), THRESHOLD);
    assert_eq!(header.subscription_count(), 3);
    assert_eq!(page.scrollable.listener_count(), 3);
}

#[test]
fn test_attach_native_sets_sticky_once() {
    let page = Page::new();
    let platform = Platform::new(DeclarationEnvironment::with_sticky([VendorPrefix::Webkit]));
    let header = StickyHeader::attach(
        page.header.clone(),
        &page.scrollable,
        StickyHeaderConfig::new(),
        &platform,
    );

    assert_eq!(header.mode(), StickyMode::Native(VendorPrefix::Webkit));
    let style = page.header.computed_style();
    assert_eq!(style.position, Position::Sticky(VendorPrefix::Webkit));
    assert_eq!(style.top, Length::Px(0));
    assert!(!header.is_attached());
    assert_eq!(page.scrollable.listener_count(), 0);

    // Scrolling never touches a natively sticky header.
    let writes = page.header.style_writes();
    page.scroll_to(200);
    page.scrollable.emit_touch_move();
    assert_eq!(page.header.style_writes(), writes);
    assert_eq!(header.state(), StickyState::Reset);
}

#[test]
fn test_attach_headless_is_inert() {
    let page = Page::new();
    let writes = page.header.style_writes();
    let header = StickyHeader::attach(
        page.header.clone(),
        &page.scrollable,
        StickyHeaderConfig::new(),
        &Platform::headless(),
    );

    assert_eq!(header.mode(), StickyMode::Inert);
    assert_eq!(page.header.style_writes(), writes);
    assert_eq!(page.scrollable.listener_count(), 0);
}

#[test]
fn test_attach_without_region_is_inert() {
    let page = Page::new();
    let orphan = Element::box_().offset(Rect::new(0, 0, 200, 20));
    let header = StickyHeader::attach(
        orphan.clone(),
        &page.scrollable,
        StickyHeaderConfig::new(),
        &manual_platform(),
    );

    assert_eq!(header.mode(), StickyMode::Inert);
    assert_eq!(header.region(), None);

    page.scroll_to(200);
    header.recompute();
    assert_eq!(header.state(), StickyState::Reset);
    assert!(orphan.classes().is_empty());
}

#[test]
fn test_explicit_parent_region_wins_over_parent() {
    let page = Page::new();
    let other = Element::box_().bounds(Rect::new(0, 500, 200, 100));
    let header = page.attach(StickyHeaderConfig::new().parent_region(StickyRegion::new(other.clone())));

    assert_eq!(header.region(), Some(other));
    assert_eq!(header.region_top(), 500);
    assert_eq!(header.region_bottom_threshold(), 580);
}

#[test]
fn test_configured_scrollable_region_is_followed() {
    let page = Page::new();
    let outer = Scrollable::new(
        Element::box_()
            .offset(Rect::new(0, 150, 300, 600))
            .client_width(300),
    );
    let header = page.attach(
        StickyHeaderConfig::new()
            .scrollable_region(outer.clone())
            .without_debounce(),
    );

    // Attach-time recompute already measured the outer container.
    assert_eq!(header.state(), StickyState::Stuck);
    assert_eq!(outer.listener_count(), 3);
    assert_eq!(page.scrollable.listener_count(), 0);
    assert_eq!(page.header.computed_style().right, Length::Px(300));
}

// ============================================================================
// State machine
// ============================================================================

#[test]
fn test_state_depends_only_on_position() {
    let page = Page::new();
    let header = page.attach(StickyHeaderConfig::new());

    for position in [0, 150, 390, 50, 380, 200, 99, 500, 101, 0, 379, 400, 120] {
        page.scroll_to(position);
        header.recompute();
        assert_eq!(
            header.state(),
            expected_state(position),
            "position {position}"
        );
    }
}

#[test]
fn test_stuck_style_pins_to_container() {
    let page = Page::new();
    let header = page.attach(StickyHeaderConfig::new().z_index(42));

    page.scroll_to(150);
    header.recompute();

    let style = page.header.computed_style();
    assert_eq!(style.position, Position::Fixed);
    assert_eq!(style.top, Length::Px(150));
    assert_eq!(style.left, Length::Px(0));
    assert_eq!(style.right, Length::Px(400));
    assert_eq!(style.bottom, Length::Auto);
    assert_eq!(style.width, Length::Px(200));
    assert_eq!(style.z_index, ZIndex::Value(42));
    assert_eq!(style.transform, Transform::Translate3d(0, 0, 0));
    assert_eq!(header.z_index(), 42);
}

#[test]
fn test_unstuck_style_anchors_to_region_bottom() {
    let page = Page::new();
    let header = page.attach(StickyHeaderConfig::new());

    page.scroll_to(THRESHOLD);
    header.recompute();

    assert_eq!(header.state(), StickyState::Unstuck);
    let style = page.header.computed_style();
    assert_eq!(style.position, Position::Absolute);
    assert_eq!(style.top, Length::Auto);
    assert_eq!(style.bottom, Length::Px(0));
    assert_eq!(style.right, Length::Px(0));
    assert_eq!(style.width, Length::Px(200));
    assert_eq!(page.region.computed_style().position, Position::Relative);
}

#[test]
fn test_classes_follow_state() {
    let page = Page::new();
    let header = page.attach(StickyHeaderConfig::new());

    page.scroll_to(150);
    header.recompute();
    assert!(page.header.has_class(STICK_START_CLASS));
    assert!(!page.header.has_class(STICK_END_CLASS));

    page.scroll_to(390);
    header.recompute();
    assert!(!page.header.has_class(STICK_START_CLASS));
    assert!(page.header.has_class(STICK_END_CLASS));

    page.scroll_to(10);
    header.recompute();
    assert!(!page.header.has_class(STICK_START_CLASS));
    assert!(!page.header.has_class(STICK_END_CLASS));
}

#[test]
fn test_reset_twice_restores_original() {
    let page = Page::new();
    let header = page.attach(StickyHeaderConfig::new());
    let original = page.header.computed_style();

    header.reset();
    assert_eq!(page.header.computed_style(), original);
    let writes = page.header.style_writes();

    header.reset();
    assert_eq!(page.header.computed_style(), original);
    assert_eq!(page.header.style_writes(), writes);
}

#[test]
fn test_stick_then_reset_restores_width() {
    let page = Page::new();
    let header = page.attach(StickyHeaderConfig::new());

    header.stick();
    assert!(header.is_stuck());
    assert_eq!(page.header.computed_style().width, Length::Px(200));

    header.reset();
    let style = page.header.computed_style();
    assert_eq!(style.width, Length::Px(200));
    assert_eq!(style.position, Position::Relative);
    assert_eq!(Some(style), header.original_style());
}

#[test]
fn test_recompute_without_movement_writes_nothing() {
    let page = Page::new();
    let header = page.attach(StickyHeaderConfig::new());

    for position in [150, 390, 20] {
        page.scroll_to(position);
        header.recompute();
        let writes = page.header.style_writes();
        header.recompute();
        header.recompute();
        assert_eq!(page.header.style_writes(), writes, "position {position}");
    }
}

// ============================================================================
// Events
// ============================================================================

#[test]
fn test_isolated_scroll_recomputes_without_poll() {
    let page = Page::new();
    let header = page.attach(StickyHeaderConfig::new());

    page.scroll_to(200);
    page.scrollable.emit_scroll(Instant::now());

    assert_eq!(header.state(), StickyState::Stuck);
    assert!(!header.has_pending_scroll());
}

#[test]
fn test_scroll_burst_is_debounced() {
    let page = Page::new();
    let header = page.attach(StickyHeaderConfig::new());
    let start = Instant::now();

    page.scroll_to(150);
    page.scrollable.emit_scroll(start);
    assert_eq!(header.state(), StickyState::Stuck);

    page.scroll_to(250);
    page.scrollable.emit_scroll(start + Duration::from_millis(2));
    page.scroll_to(390);
    page.scrollable.emit_scroll(start + Duration::from_millis(3));
    assert!(header.has_pending_scroll());
    assert_eq!(header.state(), StickyState::Stuck);

    assert!(!header.poll(start + Duration::from_millis(6)));
    assert_eq!(header.state(), StickyState::Stuck);

    assert!(header.poll(start + Duration::from_millis(8)));
    assert_eq!(header.state(), StickyState::Unstuck);
    assert!(!header.has_pending_scroll());
}

#[test]
fn test_scroll_after_quiet_window_recomputes_at_once() {
    let page = Page::new();
    let header = page.attach(StickyHeaderConfig::new());
    let start = Instant::now();

    page.scroll_to(150);
    page.scrollable.emit_scroll(start);
    page.scroll_to(50);
    page.scrollable.emit_scroll(start + Duration::from_millis(20));

    assert_eq!(header.state(), StickyState::Reset);
    assert!(!header.has_pending_scroll());
}

#[test]
fn test_scroll_without_debounce_is_immediate() {
    let page = Page::new();
    let header = page.attach(StickyHeaderConfig::new().without_debounce());

    page.scroll_to(150);
    page.scrollable.emit_scroll(Instant::now());

    assert_eq!(header.state(), StickyState::Stuck);
    assert!(!header.has_pending_scroll());
}

#[test]
fn test_touch_move_recomputes_immediately() {
    let page = Page::new();
    let header = page.attach(StickyHeaderConfig::new());

    page.scroll_to(150);
    page.scrollable.emit_touch_move();

    assert_eq!(header.state(), StickyState::Stuck);
}

#[test]
fn test_resize_remeasures_stuck_header() {
    let page = Page::new();
    let header = page.attach(StickyHeaderConfig::new());

    page.scroll_to(150);
    header.recompute();
    assert_eq!(page.header.computed_style().right, Length::Px(400));

    page.container.set_client_width(500);
    page.scrollable.emit_resize();

    assert_eq!(header.state(), StickyState::Stuck);
    assert_eq!(page.header.computed_style().right, Length::Px(500));
    assert!(page.header.has_class(STICK_START_CLASS));
}

#[test]
fn test_region_moving_up_releases_header() {
    let page = Page::new();
    let header = page.attach(StickyHeaderConfig::new().without_debounce());

    page.scroll_to(150);
    page.scrollable.emit_scroll(Instant::now());
    assert_eq!(header.state(), StickyState::Stuck);

    // Content scrolled so far the region now ends above the scroll position.
    page.scrollable
        .scroll_content_by(&[page.region.clone()], 300, Instant::now());

    assert_eq!(header.region_top(), -200);
    assert_eq!(header.region_bottom_threshold(), 80);
    assert_eq!(header.state(), StickyState::Unstuck);
}

#[test]
fn test_extreme_geometry_saturates() {
    let page = Page::new();
    page.region
        .set_bounding_rect(Rect::new(0, i32::MAX - 10, 200, i32::MAX));
    page.container
        .set_offset_rect(Rect::new(i32::MAX - 5, i32::MAX - 1, 400, 600));
    page.container.set_client_width(i32::MAX);
    let header = page.attach(StickyHeaderConfig::new().without_debounce());

    header.recompute();

    assert_eq!(header.region_bottom_threshold(), i32::MAX);
    assert_eq!(header.state(), StickyState::Stuck);
    assert_eq!(page.header.computed_style().right, Length::Px(i32::MAX));

    page.container
        .set_offset_rect(Rect::new(i32::MAX - 5, i32::MAX, 400, 600));
    header.recompute();

    assert_eq!(header.state(), StickyState::Unstuck);
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_detach_releases_subscriptions() {
    let page = Page::new();
    let mut header = page.attach(StickyHeaderConfig::new());
    let start = Instant::now();

    page.scroll_to(150);
    page.scrollable.emit_scroll(start);
    page.scroll_to(390);
    page.scrollable.emit_scroll(start + Duration::from_millis(1));
    assert!(header.has_pending_scroll());
    header.detach();

    assert!(!header.is_attached());
    assert_eq!(page.scrollable.listener_count(), 0);
    assert!(!header.has_pending_scroll());

    page.scrollable.emit_touch_move();
    assert!(!header.poll(start + Duration::from_secs(1)));
    assert_eq!(header.state(), StickyState::Stuck);
}

#[test]
fn test_drop_releases_subscriptions() {
    let page = Page::new();
    let header = page.attach(StickyHeaderConfig::new());
    assert_eq!(page.scrollable.listener_count(), 3);

    drop(header);
    assert_eq!(page.scrollable.listener_count(), 0);

    // Emitting into released slots is harmless.
    page.scrollable.emit_resize();
}
