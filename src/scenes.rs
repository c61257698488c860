//! Built-in demo scenes: a compact TTS-architecture walkthrough written
//! against the [`SceneDef`] API. They exercise every built-in effect and
//! give the CLI something to validate out of the box.

use kurbo::Point;

use crate::{
    anim::Animation,
    element::Element,
    error::StagelintResult,
    geom::BBox,
    registry::SceneRegistry,
    scene::{Scene, SceneDef},
};

fn box_at(cx: f64, cy: f64, w: f64, h: f64) -> BBox {
    BBox::from_extents(cx - w / 2.0, cx + w / 2.0, cy - h / 2.0, cy + h / 2.0)
        .expect("demo extents are non-degenerate")
}

fn text(label: &str, cx: f64, cy: f64, w: f64, h: f64) -> Element {
    Element::with_box(label, box_at(cx, cy, w, h))
}

/// A labeled panel: a container whose own extent is the surrounding
/// rectangle, with the caption as a child element.
fn panel(label: &str, cx: f64, cy: f64, w: f64, h: f64) -> Element {
    let group = Element::group([text(label, cx, cy, (w - 0.6).max(0.4), (h - 0.3).max(0.2))]);
    group.set_extent(Some(box_at(cx, cy, w, h)));
    group
}

struct Title;

impl SceneDef for Title {
    fn name(&self) -> &str {
        "Title"
    }

    fn construct(&self, scene: &mut Scene) -> StagelintResult<()> {
        let title = text("Orpheus TTS", 0.0, 2.8, 6.0, 1.0);
        let subtitle = text("LLM-based text-to-speech", 0.0, 1.7, 7.0, 0.6);
        scene.play(vec![Animation::appear(&title)]);
        scene.play(vec![Animation::appear(&subtitle)]);
        scene.wait(1.0);

        for (label, cx) in [
            ("Tokenizer", -3.7),
            ("Llama Backbone", 0.0),
            ("SNAC Codec", 3.7),
        ] {
            let pillar = panel(label, cx, 0.0, 3.2, 1.6);
            scene.play(vec![Animation::appear(&pillar)]);
        }
        scene.wait(1.0);

        let arrow_a = text("->", -1.85, 0.1, 0.4, 0.3);
        let arrow_b = text("->", 1.85, 0.1, 0.4, 0.3);
        scene.play(vec![Animation::appear(&arrow_a), Animation::appear(&arrow_b)]);

        let tagline = text("natural, expressive, multi-style", 0.0, -3.3, 5.0, 0.5);
        scene.play(vec![Animation::appear(&tagline)]);
        scene.wait(3.0);
        Ok(())
    }
}

struct Tokenization;

impl SceneDef for Tokenization {
    fn name(&self) -> &str {
        "Tokenization"
    }

    fn construct(&self, scene: &mut Scene) -> StagelintResult<()> {
        let header = text("Tokenization", 0.0, 3.2, 5.0, 0.7);
        scene.play(vec![Animation::appear(&header)]);

        let sentence = text("\"what a nice day\"", 0.0, 2.1, 4.5, 0.5);
        scene.play(vec![Animation::appear(&sentence)]);
        scene.wait(1.0);

        let arrow_down = text("v", 0.0, 1.2, 0.28, 0.7);
        let tok_label = text("Llama Tokenizer", 2.8, 1.2, 2.4, 0.4);
        scene.play(vec![
            Animation::appear(&arrow_down),
            Animation::appear(&tok_label),
        ]);
        scene.wait(0.5);

        let token_xs = [-2.55, -0.85, 0.85, 2.55];
        let tokens: Vec<Element> = ["what", "a", "nice", "day"]
            .iter()
            .zip(token_xs)
            .map(|(word, cx)| panel(word, cx, 0.0, 1.4, 0.7))
            .collect();
        scene.play(tokens.iter().map(Animation::appear).collect());
        scene.wait(0.5);

        let arrow_ids = text("v", 0.0, -0.95, 0.28, 0.5);
        scene.play(vec![Animation::appear(&arrow_ids)]);

        let ids: Vec<Element> = ["1234", "5678", "910", "1112"]
            .iter()
            .zip(token_xs)
            .map(|(id, cx)| panel(id, cx, -1.9, 1.4, 0.7))
            .collect();
        scene.play(ids.iter().map(Animation::appear).collect());
        scene.wait(1.0);

        // The tokenizer callout fades once the ids are on screen.
        scene.play(vec![Animation::disappear(&tok_label)]);

        let note = text("token ids feed the LLM backbone", 0.0, -3.3, 5.0, 0.5);
        scene.play(vec![Animation::appear(&note)]);
        scene.wait(3.0);
        Ok(())
    }
}

struct TransformerStack;

impl SceneDef for TransformerStack {
    fn name(&self) -> &str {
        "TransformerStack"
    }

    fn construct(&self, scene: &mut Scene) -> StagelintResult<()> {
        let header = text("LLM Backbone", 0.0, 3.2, 4.5, 0.7);
        scene.play(vec![Animation::appear(&header)]);

        let input = text("Text Tokens", 0.0, -3.0, 2.2, 0.4);
        scene.play(vec![Animation::appear(&input)]);

        let labels = [
            "Self-Attention",
            "Feed-Forward",
            "Self-Attention",
            "Feed-Forward",
            "Self-Attention",
            "Feed-Forward",
        ];
        for (i, label) in labels.iter().enumerate() {
            let cy = -2.175 + i as f64 * 0.67;
            let layer = panel(label, 0.0, cy, 5.0, 0.55);
            scene.play(vec![Animation::appear(&layer)]);
        }

        let output = text("Audio Tokens (SNAC)", 0.0, 2.0, 3.0, 0.4);
        scene.play(vec![Animation::appear(&output)]);
        scene.play(vec![Animation::scale_to(&output, 1.2)]);

        let legend = panel("Residual + Norm", 4.5, -0.5, 2.6, 0.6);
        scene.play(vec![Animation::appear(&legend)]);
        scene.play(vec![Animation::move_to(&legend, Point::new(4.5, 1.0))]);
        scene.wait(2.0);
        Ok(())
    }
}

/// The built-in scene collection.
pub fn builtin_registry() -> SceneRegistry {
    let mut registry = SceneRegistry::new();
    registry.register(Title);
    registry.register(Tokenization);
    registry.register(TransformerStack);
    registry
}

/// Looks up a registered scene collection by name.
pub fn collection(name: &str) -> Option<SceneRegistry> {
    match name {
        "tutorial" => Some(builtin_registry()),
        _ => None,
    }
}
