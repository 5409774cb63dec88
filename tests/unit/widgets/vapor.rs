use super::*;

use crate::config::{Tag, TextList};

fn widget(texts: &[&str]) -> VaporTextWidget {
    widget_with(texts, VaporConfig::default())
}

fn widget_with(texts: &[&str], base: VaporConfig) -> VaporTextWidget {
    let cfg = VaporConfig {
        texts: TextList(texts.iter().map(|s| (*s).to_owned()).collect()),
        ..base
    };
    let rasterizer = Arc::new(TextRasterizer::with_database(Arc::new(
        usvg::fontdb::Database::new(),
    )));
    VaporTextWidget::new(cfg, rasterizer)
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[test]
fn live_region_lists_every_text() {
    let w = widget(&["Design", "Build"]);
    assert_eq!(
        w.view().accessible[1],
        AccessibleNode::LiveRegion {
            text: "Design • Build".to_owned()
        }
    );
}

#[test]
fn active_text_is_exposed_in_its_tag() {
    let mut w = widget(&["Design", "Build"]);
    assert_eq!(
        w.view().accessible[0],
        AccessibleNode::Heading {
            level: 2,
            text: "Design".to_owned()
        }
    );
    w.tick(ms(0));
    // Hold 0.8 s then vapor 2 s: "Build" is active from 2.8 s.
    w.tick(ms(3000));
    assert_eq!(
        w.view().accessible[0],
        AccessibleNode::Heading {
            level: 2,
            text: "Build".to_owned()
        }
    );

    let h1 = widget_with(
        &["Design"],
        VaporConfig {
            tag: Tag::H1,
            ..VaporConfig::default()
        },
    );
    assert_eq!(
        h1.view().accessible[0],
        AccessibleNode::Heading {
            level: 1,
            text: "Design".to_owned()
        }
    );
    let p = widget_with(
        &["Design"],
        VaporConfig {
            tag: Tag::P,
            ..VaporConfig::default()
        },
    );
    assert_eq!(
        p.view().accessible[0],
        AccessibleNode::Text {
            text: "Design".to_owned()
        }
    );
}

#[test]
fn empty_list_uses_placeholder() {
    let w = widget(&[]);
    assert_eq!(w.texts(), ["Orphta".to_owned()]);
}

#[test]
fn particle_field_is_sized_from_density() {
    let mut w = widget(&["A"]);
    w.resize(Layout::full(400.0, 60.0, 1.0));
    let plan = w.tick(ms(0)).unwrap();
    assert_eq!(plan.layers.len(), 1);
    assert_eq!(plan.layers[0].ops.len(), 128);
}

#[test]
fn hidden_widget_pauses_particles_but_not_text() {
    let mut w = widget(&["A", "B"]);
    w.resize(Layout::full(400.0, 60.0, 1.0));
    w.tick(ms(0));

    let viewport = Rect::new(0.0, 0.0, 400.0, 800.0);
    let far = Rect::new(0.0, 2000.0, 400.0, 2060.0);
    let d = w.handle_input(&InputEvent::Intersection { element: far, viewport }, ms(0));
    assert_eq!(d, EventDisposition::Handled);
    assert!(w.particles_paused());

    let plan = w.tick(ms(3000)).unwrap();
    assert!(plan.layers.is_empty());
    let cycle = w.cycle().unwrap();
    assert_eq!(cycle.phase(), VaporPhase::Fade);
    assert_eq!(cycle.index(), 1);
}

#[test]
fn zero_sized_container_renders_nothing() {
    let mut w = widget(&["A"]);
    w.resize(Layout::full(0.0, 0.0, 1.0));
    assert!(w.tick(ms(0)).is_none());
}
