//! Unit tests for breakpoint classification and the responsive page-size table.

use rstest::rstest;

use briefkasten::managers::page_size_controller::{page_size_for, PageSizeController};
use briefkasten::types::view::Breakpoint;

#[rstest]
#[case(Breakpoint::Xxl, 18)]
#[case(Breakpoint::Xl2, 15)]
#[case(Breakpoint::Xl, 12)]
#[case(Breakpoint::Lg, 9)]
#[case(Breakpoint::Md, 6)]
#[case(Breakpoint::S, 6)]
fn test_page_size_table_for_base_15(#[case] breakpoint: Breakpoint, #[case] expected: usize) {
    assert_eq!(page_size_for(breakpoint, 15), expected);
}

#[rstest]
#[case(3000, Breakpoint::Xxl)]
#[case(2200, Breakpoint::Xxl)]
#[case(2199, Breakpoint::Xl2)]
#[case(1536, Breakpoint::Xl2)]
#[case(1280, Breakpoint::Xl)]
#[case(1024, Breakpoint::Lg)]
#[case(800, Breakpoint::Md)]
#[case(640, Breakpoint::S)]
#[case(320, Breakpoint::S)]
fn test_breakpoint_from_width(#[case] width: u32, #[case] expected: Breakpoint) {
    assert_eq!(Breakpoint::from_width(width), expected);
}

#[test]
fn test_custom_base_is_floored() {
    // 0.65 * 20 = 13, 0.8 * 7 = 5.6
    assert_eq!(page_size_for(Breakpoint::Lg, 20), 13);
    assert_eq!(page_size_for(Breakpoint::Xl, 7), 5);
}

#[test]
fn test_controller_tracks_width_and_breakpoint() {
    let mut ctl = PageSizeController::new(15);
    assert_eq!(ctl.width(), None);

    assert_eq!(ctl.on_viewport_change(1300), 12);
    assert_eq!(ctl.breakpoint(), Breakpoint::Xl);
    assert_eq!(ctl.width(), Some(1300));

    assert_eq!(ctl.on_viewport_change(500), 6);
    assert_eq!(ctl.breakpoint(), Breakpoint::S);
}

#[test]
fn test_oversized_base_does_not_overflow() {
    let ctl = PageSizeController::new(usize::MAX / 50);
    assert_eq!(ctl.page_size(), usize::MAX / 100);
}
