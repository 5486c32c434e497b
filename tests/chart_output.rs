//! Rendering charts from app state

use neurotrack::app::App;
use neurotrack::chart::{Animation, ChartLayout, ChartRenderer, SvgSurface};
use neurotrack::storage::MemoryStore;

fn render(renderer: &ChartRenderer, progress: f64) -> String {
    let mut svg = SvgSurface::new();
    renderer.draw(&mut svg, progress);
    svg.finish()
}

#[test]
fn test_all_zero_counts_use_default_ceiling() {
    let app = App::open(MemoryStore::new()).unwrap();
    let renderer = ChartRenderer::new(app.activity_chart(true), ChartLayout::default());

    assert_eq!(renderer.scale().max, 10.0);
    let doc = render(&renderer, 1.0);
    assert!(doc.contains("10 activities"));
    assert!(doc.contains("Stim Sessions"));
}

#[test]
fn test_ceiling_covers_largest_count() {
    let mut app = App::open(MemoryStore::new()).unwrap();
    for _ in 0..20 {
        app.increment("1").unwrap();
    }

    let renderer = ChartRenderer::new(app.activity_chart(false), ChartLayout::default());
    assert!(renderer.scale().max >= 20.0);

    let layout = renderer.layout();
    for p in renderer.points() {
        assert!(p.y >= layout.padding && p.y <= layout.baseline());
    }
}

#[test]
fn test_animation_frames_end_fully_drawn() {
    let mut app = App::open(MemoryStore::new()).unwrap();
    app.increment("3").unwrap();
    let renderer = ChartRenderer::new(app.activity_chart(true), ChartLayout::default());

    let frames = Animation::default().frames(10);
    assert_eq!(frames.last().copied(), Some(1.0));

    let first = render(&renderer, frames[0]);
    let last = render(&renderer, 1.0);
    assert_ne!(first, last);
    assert_eq!(render(&renderer, 5.0), last);
}
