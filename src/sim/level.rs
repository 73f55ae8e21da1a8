//! Declarative level layouts
//!
//! Positions are expressions over the canvas: an anchor (origin, floor top,
//! canvas width or height) plus a tile multiple plus raw pixels. A resize
//! before a level load changes absolute geometry but keeps the layout.

use serde::{Deserialize, Serialize};

use super::rect::{Metrics, Rect};
use crate::error::{Error, Result};

/// What a measure is offset from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    #[default]
    Origin,
    /// Top edge of the floor row (`height - tile`)
    Floor,
    /// Canvas width
    Width,
    /// Canvas height
    Height,
}

/// A length or coordinate: `anchor + tiles * tile + px`
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Measure {
    pub anchor: Anchor,
    pub tiles: f64,
    pub px: f64,
}

impl Measure {
    pub const fn px(px: f64) -> Self {
        Self {
            anchor: Anchor::Origin,
            tiles: 0.0,
            px,
        }
    }

    pub const fn tiles(tiles: f64) -> Self {
        Self {
            anchor: Anchor::Origin,
            tiles,
            px: 0.0,
        }
    }

    pub const fn floor() -> Self {
        Self::anchored(Anchor::Floor)
    }

    pub const fn width() -> Self {
        Self::anchored(Anchor::Width)
    }

    pub const fn height() -> Self {
        Self::anchored(Anchor::Height)
    }

    const fn anchored(anchor: Anchor) -> Self {
        Self {
            anchor,
            tiles: 0.0,
            px: 0.0,
        }
    }

    pub const fn plus_tiles(self, tiles: f64) -> Self {
        Self {
            tiles: self.tiles + tiles,
            ..self
        }
    }

    pub const fn plus_px(self, px: f64) -> Self {
        Self {
            px: self.px + px,
            ..self
        }
    }

    /// Evaluate against concrete canvas metrics
    pub fn resolve(&self, m: &Metrics) -> f64 {
        let base = match self.anchor {
            Anchor::Origin => 0.0,
            Anchor::Floor => m.floor_y(),
            Anchor::Width => m.width,
            Anchor::Height => m.height,
        };
        base + self.tiles * m.tile + self.px
    }
}

/// A rectangle in measures
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectDef {
    pub x: Measure,
    pub y: Measure,
    pub width: Measure,
    pub height: Measure,
}

impl RectDef {
    pub const fn new(x: Measure, y: Measure, width: Measure, height: Measure) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn resolve(&self, m: &Metrics) -> Rect {
        Rect::new(
            self.x.resolve(m),
            self.y.resolve(m),
            self.width.resolve(m),
            self.height.resolve(m),
        )
    }
}

/// A point in measures
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointDef {
    pub x: Measure,
    pub y: Measure,
}

/// What a placement spawns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceKind {
    Solid,
    Ladder,
    Hazard,
    Exit,
}

/// Copies of a piece stepped along x
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Repeat {
    pub count: u32,
    /// Pixels between consecutive copies
    pub step_px: f64,
}

/// One piece (or a row of identical pieces) in a level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub kind: PieceKind,
    pub rect: RectDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<Repeat>,
}

impl Placement {
    pub const fn new(kind: PieceKind, rect: RectDef) -> Self {
        Self {
            kind,
            rect,
            repeat: None,
        }
    }

    pub const fn repeated(self, count: u32, step_px: f64) -> Self {
        Self {
            repeat: Some(Repeat { count, step_px }),
            ..self
        }
    }

    /// Concrete rectangles for every copy, left to right
    pub fn rects(&self, m: &Metrics) -> Vec<Rect> {
        let base = self.rect.resolve(m);
        match self.repeat {
            None => vec![base],
            Some(Repeat { count, step_px }) => (0..count)
                .map(|i| base.translated_x(step_px * i as f64))
                .collect(),
        }
    }
}

/// A complete level layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDef {
    pub name: String,
    pub spawn: PointDef,
    /// Pieces in creation order; per-kind order decides collision order
    pub pieces: Vec<Placement>,
}

/// The ordered, non-empty list of levels in a run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LevelSet {
    levels: Vec<LevelDef>,
}

impl LevelSet {
    pub fn new(levels: Vec<LevelDef>) -> Result<Self> {
        if levels.is_empty() {
            return Err(Error::NoLevels);
        }
        Ok(Self { levels })
    }

    /// Parse a JSON array of level definitions
    pub fn from_json(json: &str) -> Result<Self> {
        let levels: Vec<LevelDef> = serde_json::from_str(json)?;
        Self::new(levels)
    }

    /// The two reference levels
    pub fn builtin() -> Self {
        Self {
            levels: vec![level_one(), level_two()],
        }
    }

    /// The opening level
    pub fn first(&self) -> &LevelDef {
        &self.levels[0]
    }

    /// Level by 1-based number
    pub fn get(&self, number: usize) -> Option<&LevelDef> {
        number.checked_sub(1).and_then(|i| self.levels.get(i))
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Whether `number` is the last level of the run
    pub fn is_final(&self, number: usize) -> bool {
        number >= self.levels.len()
    }
}

impl Default for LevelSet {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Outer shell shared by every level: floor, side walls, ceiling
fn shell() -> [Placement; 4] {
    use Measure as M;
    [
        Placement::new(
            PieceKind::Solid,
            RectDef::new(M::px(0.0), M::floor(), M::width(), M::tiles(1.0)),
        ),
        Placement::new(
            PieceKind::Solid,
            RectDef::new(M::px(0.0), M::px(0.0), M::tiles(1.0), M::height()),
        ),
        Placement::new(
            PieceKind::Solid,
            RectDef::new(
                M::width().plus_tiles(-1.0),
                M::px(0.0),
                M::tiles(1.0),
                M::height(),
            ),
        ),
        Placement::new(
            PieceKind::Solid,
            RectDef::new(M::px(0.0), M::px(0.0), M::width(), M::tiles(1.0)),
        ),
    ]
}

fn level_one() -> LevelDef {
    use Measure as M;
    use PieceKind::*;

    let spike = |x: Measure, y: Measure| {
        Placement::new(Hazard, RectDef::new(x, y, M::tiles(1.0), M::tiles(1.0)))
    };
    let spike_row_y = M::floor().plus_px(-38.0);

    let mut pieces = shell().to_vec();
    pieces.extend([
        // Starting ledge
        Placement::new(
            Solid,
            RectDef::new(
                M::px(44.0),
                M::floor().plus_tiles(-3.0),
                M::px(250.0),
                M::px(250.0),
            ),
        ),
        spike(M::px(300.0), spike_row_y),
        spike(M::px(300.0), spike_row_y).repeated(4, 30.0),
        spike(M::px(520.0), spike_row_y).repeated(32, 30.0),
        Placement::new(
            Solid,
            RectDef::new(
                M::px(450.0),
                M::floor().plus_px(-300.0),
                M::tiles(3.0),
                M::tiles(1.0),
            ),
        ),
        // Block after the drop
        Placement::new(
            Solid,
            RectDef::new(
                M::tiles(12.0),
                M::floor().plus_tiles(-1.5),
                M::tiles(3.0),
                M::tiles(10.0),
            ),
        ),
        Placement::new(
            Solid,
            RectDef::new(
                M::tiles(18.0),
                M::floor().plus_tiles(-6.0),
                M::tiles(3.0),
                M::tiles(1.0),
            ),
        ),
        Placement::new(
            Ladder,
            RectDef::new(
                M::tiles(17.0),
                M::floor().plus_tiles(-6.0),
                M::tiles(1.0),
                M::tiles(3.5),
            ),
        ),
        // High ledge before the exit
        Placement::new(
            Solid,
            RectDef::new(
                M::tiles(25.0),
                M::floor().plus_tiles(-7.0),
                M::tiles(4.0),
                M::tiles(1.0),
            ),
        ),
        spike(M::tiles(28.0), M::floor().plus_tiles(-8.0)),
        // Exit ledge
        Placement::new(
            Solid,
            RectDef::new(
                M::tiles(33.0),
                M::floor().plus_tiles(-3.0),
                M::tiles(8.0),
                M::tiles(1.0),
            ),
        ),
        Placement::new(
            Exit,
            RectDef::new(
                M::tiles(39.0),
                M::floor().plus_tiles(-6.0),
                M::tiles(2.0),
                M::tiles(3.0),
            ),
        ),
    ]);

    LevelDef {
        name: "The Spike Hall".to_string(),
        spawn: PointDef {
            x: M::px(100.0),
            y: M::px(100.0),
        },
        pieces,
    }
}

fn level_two() -> LevelDef {
    use Measure as M;

    let mut pieces = shell().to_vec();
    pieces.push(Placement::new(
        PieceKind::Exit,
        RectDef::new(
            M::width().plus_tiles(-4.0),
            M::floor().plus_tiles(-3.0),
            M::tiles(2.0),
            M::tiles(3.0),
        ),
    ));

    LevelDef {
        name: "The Last Door".to_string(),
        spawn: PointDef {
            x: M::px(50.0),
            y: M::floor().plus_tiles(-4.0),
        },
        pieces,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rect::Viewport;

    fn metrics() -> Metrics {
        Viewport::new(800.0, 600.0).metrics(20.0)
    }

    #[test]
    fn test_measure_resolve() {
        let m = metrics();
        assert_eq!(Measure::px(44.0).resolve(&m), 44.0);
        assert_eq!(Measure::tiles(12.0).resolve(&m), 360.0);
        assert_eq!(Measure::floor().plus_tiles(-3.0).resolve(&m), 480.0);
        assert_eq!(Measure::floor().plus_px(-38.0).resolve(&m), 532.0);
        assert_eq!(Measure::width().plus_tiles(-4.0).resolve(&m), 680.0);
        assert_eq!(Measure::height().resolve(&m), 600.0);
    }

    #[test]
    fn test_repeat_steps_along_x() {
        let m = metrics();
        let row = Placement::new(
            PieceKind::Hazard,
            RectDef::new(
                Measure::px(520.0),
                Measure::px(0.0),
                Measure::tiles(1.0),
                Measure::tiles(1.0),
            ),
        )
        .repeated(3, 30.0);
        let xs: Vec<f64> = row.rects(&m).iter().map(|r| r.x).collect();
        assert_eq!(xs, vec![520.0, 550.0, 580.0]);
    }

    #[test]
    fn test_level_lookup_is_one_based() {
        let set = LevelSet::builtin();
        assert_eq!(set.len(), 2);
        assert!(set.get(0).is_none());
        assert!(set.get(1).is_some());
        assert!(set.get(2).is_some());
        assert!(set.get(3).is_none());
        assert!(!set.is_final(1));
        assert!(set.is_final(2));
    }

    #[test]
    fn test_empty_set_rejected() {
        assert!(matches!(LevelSet::new(vec![]), Err(Error::NoLevels)));
        assert!(matches!(LevelSet::from_json("[]"), Err(Error::NoLevels)));
    }

    #[test]
    fn test_builtin_survives_json() {
        let json = serde_json::to_string(&LevelSet::builtin()).unwrap();
        let parsed = LevelSet::from_json(&json).unwrap();
        assert_eq!(parsed, LevelSet::builtin());
    }

    #[test]
    fn test_minimal_json_level() {
        let json = r#"[{
            "name": "tiny",
            "spawn": { "x": { "px": 10 }, "y": { "anchor": "floor", "tiles": -2 } },
            "pieces": [
                { "kind": "solid", "rect": {
                    "x": {}, "y": { "anchor": "floor" },
                    "width": { "anchor": "width" }, "height": { "tiles": 1 } } },
                { "kind": "hazard", "rect": {
                    "x": { "px": 100 }, "y": { "anchor": "floor", "px": -10 },
                    "width": { "px": 10 }, "height": { "px": 10 } },
                  "repeat": { "count": 2, "step_px": 20 } }
            ]
        }]"#;
        let set = LevelSet::from_json(json).unwrap();
        let level = set.get(1).unwrap();
        assert_eq!(level.spawn.y.resolve(&metrics()), 510.0);
        assert_eq!(level.pieces[1].rects(&metrics()).len(), 2);
    }
}
