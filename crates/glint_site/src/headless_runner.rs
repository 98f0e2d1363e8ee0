//! Scenario runner that drives a [`Site`] headlessly.

use crate::headless_assert::{
    evaluate_assert_mode, evaluate_assert_opacity, evaluate_assert_parallax_at_rest,
    evaluate_assert_revealed, evaluate_assert_translate, AssertionResult, HoverSnapshot,
    ParallaxSnapshot, RevealSnapshot, SiteSnapshot,
};
use crate::headless_report::ScenarioReport;
use crate::headless_runtime::{FrameClock, HeadlessRunConfig};
use crate::headless_scenario::{HeadlessScenario, HoverPreset, ScenarioStep};
use crate::site::Site;
use anyhow::{bail, Context, Result};
use glint_core::{Point, Rect};
use glint_motion::{
    HoverConfig, HoverId, ParallaxAnimator, ParallaxConfig, ParallaxId, RevealAnimator,
    RevealDirection, RevealId, StaggerConfig,
};
use glint_theme::ThemeMode;
use std::collections::BTreeMap;

/// Stagger step when a scenario names children but no delay
const DEFAULT_STAGGER_STEP: f32 = 0.1;

/// Final outcome of a scenario run.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Passed { report: ScenarioReport },
    Failed { report: ScenarioReport },
}

impl RunOutcome {
    pub fn report(&self) -> &ScenarioReport {
        match self {
            RunOutcome::Passed { report } => report,
            RunOutcome::Failed { report } => report,
        }
    }

    pub fn into_report(self) -> ScenarioReport {
        match self {
            RunOutcome::Passed { report } | RunOutcome::Failed { report } => report,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RunOutcome::Failed { .. })
    }
}

#[derive(Debug, Clone, Copy)]
enum Element {
    Reveal(RevealId),
    Parallax(ParallaxId),
    Hover(HoverId),
}

/// Parse scenario JSON and run it against `site`.
pub fn run_scenario(site: &mut Site, input: &str, cfg: HeadlessRunConfig) -> Result<RunOutcome> {
    let scenario = HeadlessScenario::from_json(input)?;
    run_loaded_scenario(site, &scenario, cfg)
}

/// Run a pre-loaded scenario against `site`.
///
/// Assertion failures produce [`RunOutcome::Failed`]. Malformed steps (unknown
/// element ids, duplicate mounts, unparseable modes) are errors.
pub fn run_loaded_scenario(
    site: &mut Site,
    scenario: &HeadlessScenario,
    cfg: HeadlessRunConfig,
) -> Result<RunOutcome> {
    cfg.validate()?;
    let mut runner = Runner {
        site,
        cfg,
        clock: FrameClock::default(),
        scroll_y: 0.0,
        elements: BTreeMap::new(),
    };
    runner.apply_viewport();

    for (step_index, step) in scenario.steps.iter().enumerate() {
        let result = runner
            .step(step)
            .with_context(|| format!("scenario step {step_index} failed"))?;

        if let Some((assertion, AssertionResult::Failed { code, message })) = result {
            tracing::info!(step_index, assertion, %message, "assertion failed");
            let report = ScenarioReport::failed(
                assertion,
                step_index,
                code,
                message,
                runner.clock.frames,
                runner.clock.ms,
                runner.snapshot(),
            )
            .with_scenario(scenario.name.clone());
            return Ok(RunOutcome::Failed { report });
        }
    }

    let report = ScenarioReport::passed(runner.clock.frames, runner.clock.ms, runner.snapshot())
        .with_scenario(scenario.name.clone());
    Ok(RunOutcome::Passed { report })
}

struct Runner<'a> {
    site: &'a mut Site,
    cfg: HeadlessRunConfig,
    clock: FrameClock,
    scroll_y: f32,
    elements: BTreeMap<String, Element>,
}

impl Runner<'_> {
    fn viewport(&self) -> Rect {
        Rect::new(0.0, self.scroll_y, self.cfg.width, self.cfg.height)
    }

    fn apply_viewport(&mut self) {
        let viewport = self.viewport();
        self.site.motion_mut().update_viewport(viewport);
    }

    fn run_frames(&mut self, frames: u32, mut advance_ms: impl FnMut() -> u64) {
        for _ in 0..frames {
            let dt = self.clock.advance(advance_ms());
            self.site.tick(dt);
        }
    }

    fn element(&self, id: &str) -> Result<Element> {
        match self.elements.get(id) {
            Some(element) => Ok(*element),
            None => bail!("unknown element id {id:?}"),
        }
    }

    fn ensure_unmounted(&self, id: &str) -> Result<()> {
        if self.elements.contains_key(id) {
            bail!("element id {id:?} is already mounted");
        }
        Ok(())
    }

    fn step(&mut self, step: &ScenarioStep) -> Result<Option<(&'static str, AssertionResult)>> {
        match step {
            ScenarioStep::Wait { ms } => {
                let frames = self.cfg.wait_frames(*ms);
                let tick_ms = self.cfg.tick_ms;
                let mut remaining_ms = *ms;
                self.run_frames(frames, || {
                    let step_ms = remaining_ms.min(tick_ms);
                    remaining_ms = remaining_ms.saturating_sub(step_ms);
                    step_ms
                });
            }
            ScenarioStep::Tick { frames } => {
                let tick_ms = self.cfg.tick_ms;
                self.run_frames(*frames, || tick_ms);
            }
            ScenarioStep::ToggleTheme => {
                self.site.toggle_theme();
            }
            ScenarioStep::SetTheme { mode } => match mode.parse::<ThemeMode>() {
                Ok(mode) => {
                    self.site.set_theme(mode);
                }
                Err(err) => tracing::debug!(%err, "set_theme ignored"),
            },
            ScenarioStep::Reload => {
                self.site.reload();
                self.elements.clear();
                self.apply_viewport();
            }
            ScenarioStep::Scroll { y } => {
                self.scroll_y = *y;
                self.apply_viewport();
            }
            ScenarioStep::PointerMove { x, y } => {
                self.site.motion_mut().pointer_move(Point::new(*x, *y));
            }
            ScenarioStep::PointerLeave => {
                self.site.motion_mut().pointer_leave();
            }
            ScenarioStep::HoverEnter { id } => {
                let Element::Hover(hover) = self.element(id)? else {
                    bail!("{id:?} is not a hover element");
                };
                self.site.motion_mut().hover_enter(hover);
            }
            ScenarioStep::HoverLeave { id } => {
                let Element::Hover(hover) = self.element(id)? else {
                    bail!("{id:?} is not a hover element");
                };
                self.site.motion_mut().hover_leave(hover);
            }
            ScenarioStep::MountReveal {
                id,
                bounds,
                direction,
                delay,
                once,
                threshold,
                stagger_children,
                stagger_delay,
            } => {
                self.ensure_unmounted(id)?;
                let mut config = self.site.reveal_config();
                if let Some(direction) = direction {
                    config = config.direction(RevealDirection::parse(direction));
                }
                if let Some(delay) = delay {
                    config = config.delay(*delay);
                }
                if let Some(once) = once {
                    config = config.once(*once);
                }
                if let Some(threshold) = threshold {
                    config = config.threshold(*threshold);
                }
                if stagger_delay.is_some() || stagger_children.is_some() {
                    let step = stagger_delay.unwrap_or(DEFAULT_STAGGER_STEP);
                    config = config.stagger(StaggerConfig::new(step));
                }
                let reveal = RevealAnimator::with_children(config, stagger_children.unwrap_or(0))
                    .with_bounds((*bounds).into());

                let handle = self.site.mount_reveal(reveal);
                self.elements.insert(id.clone(), Element::Reveal(handle));
            }
            ScenarioStep::MountParallax {
                id,
                bounds,
                hero,
                depth,
            } => {
                self.ensure_unmounted(id)?;
                let mut config = if *hero {
                    ParallaxConfig::hero()
                } else {
                    self.site.config().parallax_config()
                };
                if let Some(depth) = depth {
                    config = config.depth(*depth);
                }
                let mut parallax = ParallaxAnimator::new(config);
                if let Some(bounds) = bounds {
                    parallax.set_reference((*bounds).into());
                }

                let handle = self.site.mount_parallax(parallax);
                self.elements.insert(id.clone(), Element::Parallax(handle));
            }
            ScenarioStep::MountHover { id, preset, glow } => {
                self.ensure_unmounted(id)?;
                let mut config = match preset {
                    HoverPreset::Card => HoverConfig::card(),
                    HoverPreset::Button => HoverConfig::button(),
                    HoverPreset::Sticker => HoverConfig::sticker(),
                };
                if let Some(glow) = glow {
                    config = config.glow(*glow);
                }

                let handle = self.site.mount_hover(config);
                self.elements.insert(id.clone(), Element::Hover(handle));
            }
            ScenarioStep::Unmount { id } => {
                let element = self.element(id)?;
                let motion = self.site.motion_mut();
                match element {
                    Element::Reveal(handle) => {
                        motion.unmount_reveal(handle);
                    }
                    Element::Parallax(handle) => {
                        motion.unmount_parallax(handle);
                    }
                    Element::Hover(handle) => {
                        motion.unmount_hover(handle);
                    }
                }
                self.elements.remove(id);
            }
            ScenarioStep::AssertMode { mode } => {
                let expected: ThemeMode = mode.parse()?;
                let result = evaluate_assert_mode(expected, &self.snapshot());
                return Ok(Some(("assert_mode", result)));
            }
            ScenarioStep::AssertRevealed { id, revealed } => {
                let result = evaluate_assert_revealed(id, *revealed, &self.snapshot());
                return Ok(Some(("assert_revealed", result)));
            }
            ScenarioStep::AssertOpacity {
                id,
                value,
                tolerance,
            } => {
                let result = evaluate_assert_opacity(id, *value, *tolerance, &self.snapshot());
                return Ok(Some(("assert_opacity", result)));
            }
            ScenarioStep::AssertTranslate { id, x, y, tolerance } => {
                let result = evaluate_assert_translate(id, [*x, *y], *tolerance, &self.snapshot());
                return Ok(Some(("assert_translate", result)));
            }
            ScenarioStep::AssertParallaxAtRest { id } => {
                let result = evaluate_assert_parallax_at_rest(id, &self.snapshot());
                return Ok(Some(("assert_parallax_at_rest", result)));
            }
        }
        Ok(None)
    }

    fn snapshot(&self) -> SiteSnapshot {
        let motion = self.site.motion();
        let mut snapshot = SiteSnapshot {
            mode: self.site.theme().mode(),
            ..SiteSnapshot::default()
        };

        for (id, element) in &self.elements {
            match *element {
                Element::Reveal(handle) => {
                    if let Some(reveal) = motion.reveal(handle) {
                        let pose = reveal.pose();
                        let children = (0..reveal.child_count())
                            .filter_map(|i| reveal.child_pose(i))
                            .map(|p| p.opacity)
                            .collect();
                        snapshot.reveals.insert(
                            id.clone(),
                            RevealSnapshot {
                                revealed: reveal.is_revealed(),
                                reveal_count: reveal.reveal_count(),
                                opacity: pose.opacity,
                                translate: [pose.translate.x, pose.translate.y],
                                children,
                            },
                        );
                    }
                }
                Element::Parallax(handle) => {
                    if let Some(parallax) = motion.parallax(handle) {
                        let offset = parallax.pointer_offset();
                        let transform = parallax.transform();
                        snapshot.parallaxes.insert(
                            id.clone(),
                            ParallaxSnapshot {
                                at_rest: parallax.is_at_rest(),
                                offset: [offset.x, offset.y],
                                translate: [transform.translate.x, transform.translate.y],
                                rotate: transform.rotate,
                            },
                        );
                    }
                }
                Element::Hover(handle) => {
                    if let Some(hover) = motion.hover(handle) {
                        let transform = hover.transform();
                        snapshot.hovers.insert(
                            id.clone(),
                            HoverSnapshot {
                                hovering: hover.is_hovering(),
                                scale: transform.scale,
                                lift: -transform.translate.y,
                                glow_opacity: hover.glow().map(|g| g.opacity),
                            },
                        );
                    }
                }
            }
        }
        snapshot
    }
}
