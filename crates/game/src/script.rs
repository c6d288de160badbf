//! Deterministic input scripts for headless runs.
//!
//! A script is a JSON list of steps, executed in order:
//!
//! ```json
//! { "steps": [
//!   { "menu": "new canvas" },
//!   { "dt": 0.016, "player": [4.0, 1.0, 4.0] },
//!   { "input": "right mouse down", "hover": { "position": [8, 0, 8], "normal": [0, 1, 0] } },
//!   { "input": "escape" },
//!   { "menu": "save canvas" }
//! ] }
//! ```
//!
//! A step may combine a tick with an input; the tick runs first.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use canvas_engine::world::position::{BlockPos, Face, PlayerPos};

use crate::host::Host;
use crate::input::{InputEvent, MenuAction};
use crate::session::{Hover, Session};

#[derive(Debug, Deserialize)]
struct ScriptFile {
    steps: Vec<StepDef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct StepDef {
    #[serde(default)]
    dt: Option<f32>,
    #[serde(default)]
    player: Option<[f64; 3]>,
    #[serde(default)]
    input: Option<String>,
    #[serde(default)]
    hover: Option<HoverDef>,
    #[serde(default)]
    menu: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct HoverDef {
    position: [i64; 3],
    normal: [f64; 3],
}

#[derive(Debug, Clone, PartialEq)]
enum Step {
    Tick { dt: f32, player: Option<PlayerPos> },
    Input { event: InputEvent, hover: Option<Hover> },
    Menu(MenuAction),
}

/// A parsed script, ready to drive a [`Session`].
#[derive(Debug)]
pub struct ScriptPlayer {
    steps: Vec<Step>,
}

impl ScriptPlayer {
    /// Load a script from a JSON file on disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?;
        contents
            .parse()
            .with_context(|| format!("parsing script {}", path.display()))
    }

    /// Number of steps after expansion. Never zero.
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Run every step against `session`. Returns the number of steps executed.
    pub fn run(&self, session: &mut Session, host: &mut dyn Host) -> usize {
        let mut player = session.player();
        for step in &self.steps {
            match step {
                Step::Tick { dt, player: moved } => {
                    if let Some(moved) = moved {
                        player = *moved;
                    }
                    player = session.update(*dt, player, host);
                }
                Step::Input { event, hover } => {
                    session.handle_input(*event, *hover, host);
                    player = session.player();
                }
                Step::Menu(action) => {
                    session.handle_menu(*action, host);
                    player = session.player();
                }
            }
        }
        self.steps.len()
    }
}

/// Parse a script from an in-memory JSON string.
impl FromStr for ScriptPlayer {
    type Err = anyhow::Error;

    fn from_str(contents: &str) -> Result<Self> {
        let file: ScriptFile = serde_json::from_str(contents)?;
        if file.steps.is_empty() {
            bail!("script contains no steps");
        }

        let mut steps = Vec::with_capacity(file.steps.len());
        for (i, def) in file.steps.into_iter().enumerate() {
            let before = steps.len();
            parse_step(def, &mut steps).with_context(|| format!("step {i}"))?;
            if steps.len() == before {
                bail!("step {i} does nothing");
            }
        }
        Ok(Self { steps })
    }
}

fn parse_step(def: StepDef, out: &mut Vec<Step>) -> Result<()> {
    if def.dt.is_some() || def.player.is_some() {
        let dt = def.dt.unwrap_or(0.0);
        if !dt.is_finite() || dt < 0.0 {
            bail!("dt must be a non-negative number, got {dt}");
        }
        let player = def.player.map(|[x, y, z]| PlayerPos::new(x, y, z));
        out.push(Step::Tick { dt, player });
    }

    if let Some(name) = &def.input {
        let event: InputEvent = name.parse()?;
        let hover = match def.hover {
            Some(h) => {
                let face = Face::from_normal(h.normal)
                    .with_context(|| format!("hover normal {:?} is not a direction", h.normal))?;
                let [x, y, z] = h.position;
                Some(Hover {
                    pos: BlockPos::new(x, y, z),
                    face,
                })
            }
            None => None,
        };
        out.push(Step::Input { event, hover });
    } else if def.hover.is_some() {
        bail!("hover given without input");
    }

    if let Some(name) = &def.menu {
        out.push(Step::Menu(name.parse()?));
    }
    Ok(())
}
