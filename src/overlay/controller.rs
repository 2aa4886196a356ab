//! HUD state machine
//!
//! One controller owns the single overlay session of the process. It lives
//! on the UI thread and is advanced by `tick`, which applies queued
//! commands, follows the host's bounds, steps the animations and fires
//! timers. All time comes in through `tick`, so a virtual clock drives it
//! just as well as a frame loop.

use crossbeam_channel::{unbounded, Receiver, Sender};
use egui::{Color32, Rect};
use image::RgbaImage;
use serde::Serialize;
use std::f32::consts::TAU;
use std::sync::Arc;
use std::thread::{self, ThreadId};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::config::HudConfig;
use crate::host::{BoundsSubscription, HostBinding, SurfaceId};
use crate::icon::{GlyphCache, GlyphKind};
use crate::overlay::animation::{Animation, PanelVisuals, Tween};
use crate::overlay::state::{ContentKind, Layout, OverlaySession, TextAlign, Theme};
use crate::overlay::widgets::PanelStyle;
use crate::shared::{Completion, HudCommand, HudHandle, ShowRequest};

/// Spinner steps per revolution; one revolution per second
const SPINNER_STEPS: f32 = 12.0;

/// Deferred work run on the UI thread with the controller at hand
type Continuation<H> = Box<dyn FnOnce(&mut OverlayController<H>)>;

/// Observable presentation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Not attached to any surface
    Hidden,
    /// Pop-in running
    Showing,
    /// Steady state
    Visible,
    /// Showing a result that dismisses itself
    Transient,
    /// Pop-out running
    Hiding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PanelMotion {
    /// Enter animation from the popped state
    PopIn,
    /// Back to rest from wherever a pop-out left the panel
    Restore,
    /// Exit animation; detaches when it finishes
    PopOut,
}

struct PanelAnimation<H> {
    motion: PanelMotion,
    animation: Animation<PanelVisuals, Continuation<H>>,
}

struct Timer<H> {
    due: Instant,
    action: Continuation<H>,
}

#[derive(Debug, Clone, Copy)]
struct Timings {
    duration: Duration,
    dwell: Duration,
    initial_scale: f32,
}

/// Spinner drawing state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinnerFrame {
    /// Rotation of the leading spoke in radians
    pub rotation: f32,
    pub color: Color32,
}

#[derive(Debug, Clone)]
pub struct GlyphFrame {
    pub kind: GlyphKind,
    /// Bitmap at the surface's pixel density
    pub image: Arc<RgbaImage>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextFrame {
    pub text: String,
    /// Cross-fade opacity, multiplied with the panel opacity when drawn
    pub alpha: f32,
    pub color: Color32,
    pub font_size: f32,
    pub align: TextAlign,
}

/// Everything needed to draw one frame of the HUD
#[derive(Debug, Clone)]
pub struct HudFrame {
    pub phase: Phase,
    /// Full host bounds, covered by the tint
    pub container: Rect,
    pub container_alpha: f32,
    pub tint: Color32,
    /// Panel at rest, centered in the container
    pub panel: Rect,
    pub panel_alpha: f32,
    /// Scale about the panel's center
    pub panel_scale: f32,
    pub panel_fill: Color32,
    pub layout: Layout,
    pub style: PanelStyle,
    /// Whether the stack keeps space for the indicator
    pub indicator_slot: bool,
    pub spinner: Option<SpinnerFrame>,
    pub glyph: Option<GlyphFrame>,
    pub text: Option<TextFrame>,
}

/// Serializable summary of the controller, printed by the scripted demo
#[derive(Debug, Clone, Serialize)]
pub struct HudStatus {
    pub phase: Phase,
    pub surface: Option<SurfaceId>,
    pub theme: Theme,
    pub layout: Layout,
    pub content: ContentKind,
    pub message: Option<String>,
    pub spinner: bool,
    pub glyph: Option<GlyphKind>,
    pub container_alpha: f32,
    pub panel_alpha: f32,
    pub panel_scale: f32,
    pub text_alpha: f32,
}

/// Owner of the overlay session
pub struct OverlayController<H> {
    host: H,
    session: OverlaySession,
    glyphs: GlyphCache,
    style: PanelStyle,
    timings: Timings,
    visuals: PanelVisuals,
    text_alpha: f32,
    panel_animation: Option<PanelAnimation<H>>,
    text_animation: Option<Animation<f32, Continuation<H>>>,
    timers: Vec<Timer<H>>,
    /// Hide callbacks, run once a pop-out completes or the surface goes away
    pending_hidden: Vec<Continuation<H>>,
    subscription: Option<BoundsSubscription>,
    glyph: Option<(GlyphKind, Arc<RgbaImage>)>,
    spinner_started: Option<Instant>,
    /// Set from a result show until its dwell runs out
    transient: bool,
    commands: Receiver<HudCommand>,
    sender: Sender<HudCommand>,
    now: Instant,
    ui_thread: ThreadId,
}

impl<H: HostBinding + 'static> OverlayController<H> {
    /// Create the controller on the thread that will tick it
    pub fn new(host: H, config: &HudConfig) -> Self {
        let (sender, commands) = unbounded();
        let scale = host
            .top_level()
            .map(|surface| host.scale_factor(surface))
            .unwrap_or(1.0);

        Self {
            host,
            session: OverlaySession::new(config.defaults.theme, config.defaults.layout),
            glyphs: GlyphCache::new(scale),
            style: PanelStyle::from(&config.appearance),
            timings: Timings {
                duration: config.animation.duration(),
                dwell: config.animation.dwell(),
                initial_scale: config.animation.initial_scale,
            },
            visuals: PanelVisuals::IDENTITY,
            text_alpha: 1.0,
            panel_animation: None,
            text_animation: None,
            timers: Vec::new(),
            pending_hidden: Vec::new(),
            subscription: None,
            glyph: None,
            spinner_started: None,
            transient: false,
            commands,
            sender,
            now: Instant::now(),
            ui_thread: thread::current().id(),
        }
    }

    /// Handle for enqueueing commands from any thread
    pub fn handle(&self) -> HudHandle {
        HudHandle::new(self.sender.clone())
    }

    /// Advance the overlay to `now`
    pub fn tick(&mut self, now: Instant) {
        debug_assert_eq!(
            thread::current().id(),
            self.ui_thread,
            "HUD controller must be ticked on the thread that created it"
        );
        self.now = now;

        while let Ok(command) = self.commands.try_recv() {
            self.apply(command);
        }
        self.sync_bounds();
        self.advance_animations();
        self.fire_timers();
    }

    /// Apply one command immediately, at the time of the last tick
    pub fn apply(&mut self, command: HudCommand) {
        debug!("Applying {:?}", command);
        match command {
            HudCommand::Show(request) => self.show(request),
            HudCommand::UpdateText(message) => self.update_text(message),
            HudCommand::Hide { on_hidden } => self.hide(on_hidden),
            HudCommand::HideWithResult {
                success,
                message,
                on_hidden,
            } => self.hide_with_result(success, message, on_hidden),
        }
    }

    /// Present the overlay, or reconfigure it in place when already shown
    ///
    /// Animations started here begin at the time of the last `tick`. Tick
    /// with the current time first when calling this after an idle gap.
    pub fn show(&mut self, mut request: ShowRequest) {
        let on_shown = Self::continuation(request.on_shown.take());
        self.present(request, on_shown);
    }

    /// Cross-fade to `message`, starting at the last tick; ignored while hidden
    pub fn update_text(&mut self, message: impl Into<String>) {
        if !self.session.is_attached() {
            debug!("HUD hidden, ignoring text update");
            return;
        }
        self.session.message = Some(message.into());
        self.cross_fade_text(None);
    }

    /// Pop the overlay out and detach it; ignored while hidden
    ///
    /// `on_hidden` runs once a pop-out has completed. A show that cancels
    /// the pop-out keeps it waiting for the next one.
    pub fn hide(&mut self, on_hidden: Option<Completion>) {
        self.transient = false;
        self.apply_hide(Self::continuation(on_hidden));
    }

    /// Show a success or error result, keep it up for the dwell, then hide
    pub fn hide_with_result(
        &mut self,
        success: bool,
        message: Option<String>,
        on_hidden: Option<Completion>,
    ) {
        let content = if success {
            ContentKind::Success
        } else {
            ContentKind::Error
        };
        let on_hidden = Self::continuation(on_hidden);
        let dwell = self.timings.dwell;
        let after_shown: Continuation<H> = Box::new(move |controller: &mut Self| {
            debug!("Result shown, hiding in {:?}", dwell);
            controller.timers.push(Timer {
                due: controller.now + dwell,
                action: Box::new(move |controller: &mut Self| {
                    controller.transient = false;
                    controller.apply_hide(on_hidden);
                }),
            });
        });

        let request = ShowRequest {
            host: self.session.host,
            theme: self.session.theme,
            layout: self.session.layout,
            content,
            message,
            on_shown: None,
        };
        self.transient = true;
        self.present(request, Some(after_shown));
    }

    pub fn phase(&self) -> Phase {
        if !self.session.is_attached() {
            return Phase::Hidden;
        }
        match self.panel_motion() {
            Some(PanelMotion::PopOut) => Phase::Hiding,
            _ if self.transient => Phase::Transient,
            Some(_) => Phase::Showing,
            None => Phase::Visible,
        }
    }

    pub fn session(&self) -> &OverlaySession {
        &self.session
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn glyph_cache(&self) -> &GlyphCache {
        &self.glyphs
    }

    /// A panel or text animation is running
    pub fn is_animating(&self) -> bool {
        self.panel_animation.is_some() || self.text_animation.is_some()
    }

    /// Earliest pending timer
    pub fn next_timer(&self) -> Option<Instant> {
        self.timers.iter().map(|timer| timer.due).min()
    }

    /// Nothing queued, running or scheduled
    pub fn is_idle(&self) -> bool {
        !self.is_animating() && self.timers.is_empty() && self.commands.is_empty()
    }

    /// Snapshot for drawing; `None` while hidden
    pub fn frame(&self) -> Option<HudFrame> {
        self.session.attached?;

        let theme = self.session.theme;
        let foreground = theme.foreground();
        let spinner = self.spinner_started.map(|started| SpinnerFrame {
            rotation: spinner_rotation(self.now.saturating_duration_since(started)),
            color: foreground,
        });
        let glyph = self.glyph.as_ref().map(|(kind, image)| GlyphFrame {
            kind: *kind,
            image: Arc::clone(image),
        });
        let text = self.session.message.as_ref().map(|text| TextFrame {
            text: text.clone(),
            alpha: self.text_alpha,
            color: foreground,
            font_size: self.style.font_size,
            align: self.session.layout.text_align(),
        });

        Some(HudFrame {
            phase: self.phase(),
            container: self.session.bounds,
            container_alpha: self.visuals.container_alpha,
            tint: theme.background_tint(),
            panel: self.session.panel_rect(),
            panel_alpha: self.visuals.panel_alpha,
            panel_scale: self.visuals.panel_scale,
            panel_fill: theme.panel_fill(),
            layout: self.session.layout,
            style: self.style,
            indicator_slot: self.session.content.reserves_indicator_slot(),
            spinner,
            glyph,
            text,
        })
    }

    pub fn status(&self) -> HudStatus {
        HudStatus {
            phase: self.phase(),
            surface: self.session.attached,
            theme: self.session.theme,
            layout: self.session.layout,
            content: self.session.content,
            message: self.session.message.clone(),
            spinner: self.spinner_started.is_some(),
            glyph: self.glyph.as_ref().map(|(kind, _)| *kind),
            container_alpha: self.visuals.container_alpha,
            panel_alpha: self.visuals.panel_alpha,
            panel_scale: self.visuals.panel_scale,
            text_alpha: self.text_alpha,
        }
    }

    fn continuation(completion: Option<Completion>) -> Option<Continuation<H>> {
        completion.map(|callback| Box::new(move |_: &mut Self| callback()) as Continuation<H>)
    }

    fn run(&mut self, continuations: Vec<Continuation<H>>) {
        for continuation in continuations {
            continuation(self);
        }
    }

    fn panel_motion(&self) -> Option<PanelMotion> {
        self.panel_animation.as_ref().map(|panel| panel.motion)
    }

    fn present(&mut self, request: ShowRequest, on_shown: Option<Continuation<H>>) {
        let Some((surface, bounds)) = self.host.resolve(request.host) else {
            debug!("No surface to show the HUD on, ignoring show");
            self.run(on_shown.into_iter().collect());
            return;
        };
        if !self.attach_to(surface) {
            debug!("Surface {:?} refused the HUD, ignoring show", surface);
            self.run(on_shown.into_iter().collect());
            return;
        }

        self.set_theme(request.theme);
        self.session.layout = request.layout;
        self.session.host = request.host;
        self.session.bounds = bounds;
        self.session.scale_factor = self.host.scale_factor(surface);
        self.glyphs.set_scale(self.session.scale_factor);

        let had_text = self.session.message.is_some();
        self.session.message = request.message;
        self.route_content(request.content);

        match self.panel_motion() {
            Some(PanelMotion::PopOut) => {
                self.restore_panel();
                if had_text {
                    self.cross_fade_text(on_shown);
                } else {
                    self.join_panel_animation(on_shown);
                }
            }
            Some(PanelMotion::PopIn | PanelMotion::Restore) if !had_text => {
                self.join_panel_animation(on_shown);
            }
            _ if had_text => self.cross_fade_text(on_shown),
            _ => self.pop_in(on_shown),
        }
    }

    fn attach_to(&mut self, surface: SurfaceId) -> bool {
        if self.session.attached == Some(surface) {
            return true;
        }
        if let Some(previous) = self.session.attached {
            info!("Moving HUD from {:?} to {:?}", previous, surface);
            self.release_surface();
        }

        let Some(subscription) = self.host.attach(surface) else {
            return false;
        };
        self.subscription = Some(subscription);
        self.session.attached = Some(surface);
        self.host.set_interaction_enabled(surface, false);
        info!("HUD attached to {:?}", surface);
        true
    }

    fn release_surface(&mut self) {
        if let Some(surface) = self.session.attached.take() {
            self.subscription = None;
            self.host.detach(surface);
            self.host.set_interaction_enabled(surface, true);
            info!("HUD detached from {:?}", surface);
        }
    }

    fn set_theme(&mut self, theme: Theme) {
        if self.session.theme != theme {
            debug!("Theme {} -> {}", self.session.theme.name(), theme.name());
            self.session.theme = theme;
            self.glyphs.invalidate();
        }
    }

    fn route_content(&mut self, content: ContentKind) {
        self.session.content = content;
        self.refresh_glyph();
        if content.shows_spinner() {
            self.spinner_started.get_or_insert(self.now);
        } else {
            self.spinner_started = None;
        }
    }

    fn refresh_glyph(&mut self) {
        let theme = self.session.theme;
        self.glyph = match GlyphKind::for_content(self.session.content) {
            Some(kind) => Some((kind, self.glyphs.get(kind, theme))),
            None => None,
        };
    }

    fn pop_in(&mut self, on_shown: Option<Continuation<H>>) {
        let from = PanelVisuals::popped(self.timings.initial_scale);
        self.visuals = from;
        self.start_panel_animation(PanelMotion::PopIn, from, PanelVisuals::IDENTITY, on_shown);
    }

    fn restore_panel(&mut self) {
        debug!("Show during pop-out, restoring the panel");
        self.start_panel_animation(PanelMotion::Restore, self.visuals, PanelVisuals::IDENTITY, None);
    }

    fn join_panel_animation(&mut self, on_shown: Option<Continuation<H>>) {
        if let Some(panel) = self.panel_animation.as_mut() {
            panel.animation.on_complete(on_shown);
            return;
        }
        self.run(on_shown.into_iter().collect());
    }

    /// Replace the panel animation; the new one inherits the replaced one's callbacks
    fn start_panel_animation(
        &mut self,
        motion: PanelMotion,
        from: PanelVisuals,
        to: PanelVisuals,
        completion: Option<Continuation<H>>,
    ) {
        let mut animation = Animation::new(Tween::new(from, to, self.now, self.timings.duration));
        if let Some(previous) = self.panel_animation.take() {
            debug!("Retargeting panel from {:?} to {:?}", previous.motion, motion);
            animation.inherit(previous.animation);
        }
        animation.on_complete(completion);
        self.panel_animation = Some(PanelAnimation { motion, animation });
    }

    fn cross_fade_text(&mut self, completion: Option<Continuation<H>>) {
        let mut animation = Animation::new(Tween::new(0.0, 1.0, self.now, self.timings.duration));
        if let Some(previous) = self.text_animation.take() {
            animation.inherit(previous);
        }
        animation.on_complete(completion);
        self.text_animation = Some(animation);
        self.text_alpha = 0.0;
    }

    fn apply_hide(&mut self, on_hidden: Option<Continuation<H>>) {
        if !self.session.is_attached() {
            debug!("HUD already hidden, ignoring hide");
            self.run(on_hidden.into_iter().collect());
            return;
        }
        self.pending_hidden.extend(on_hidden);
        if self.panel_motion() == Some(PanelMotion::PopOut) {
            return;
        }

        let to = PanelVisuals::shrunk(self.timings.initial_scale);
        self.start_panel_animation(PanelMotion::PopOut, self.visuals, to, None);
    }

    /// Reset everything a hide clears, give the surface back, then run the
    /// callbacks still waiting: `carried` first, hide callbacks last
    fn teardown(&mut self, carried: Vec<Continuation<H>>) {
        let text = self.text_animation.take();
        self.visuals = PanelVisuals::IDENTITY;
        self.text_alpha = 1.0;
        self.session.message = None;
        self.glyph = None;
        self.spinner_started = None;
        self.transient = false;
        self.release_surface();

        if let Some(text) = text {
            self.run(text.into_completions());
        }
        self.run(carried);
        let hidden = std::mem::take(&mut self.pending_hidden);
        self.run(hidden);
    }

    fn sync_bounds(&mut self) {
        let Some(surface) = self.session.attached else {
            return;
        };

        if self.host.bounds(surface).is_none() {
            info!("Surface {:?} disappeared under the HUD", surface);
            let carried = self
                .panel_animation
                .take()
                .map(|panel| panel.animation.into_completions())
                .unwrap_or_default();
            self.teardown(carried);
            return;
        }

        if let Some(bounds) = self
            .subscription
            .as_ref()
            .filter(|s| s.surface() == surface)
            .and_then(|s| s.latest())
        {
            debug!("Host bounds changed to {:?}", bounds);
            self.session.bounds = bounds;
        }

        let scale = self.host.scale_factor(surface);
        if (scale - self.session.scale_factor).abs() > f32::EPSILON {
            debug!("Pixel density changed to {}", scale);
            self.session.scale_factor = scale;
            self.glyphs.set_scale(scale);
            self.refresh_glyph();
        }
    }

    fn advance_animations(&mut self) {
        let now = self.now;

        let text_finished = match &self.text_animation {
            Some(text) => {
                self.text_alpha = text.value_at(now);
                text.is_finished(now)
            }
            None => false,
        };
        if text_finished {
            if let Some(text) = self.text_animation.take() {
                self.run(text.into_completions());
            }
        }

        let panel_finished = match &self.panel_animation {
            Some(panel) => {
                self.visuals = panel.animation.value_at(now);
                panel.animation.is_finished(now)
            }
            None => false,
        };
        if panel_finished {
            if let Some(panel) = self.panel_animation.take() {
                let completions = panel.animation.into_completions();
                if panel.motion == PanelMotion::PopOut {
                    self.teardown(completions);
                } else {
                    self.run(completions);
                }
            }
        }
    }

    fn fire_timers(&mut self) {
        let now = self.now;
        let (due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.timers)
            .into_iter()
            .partition(|timer| timer.due <= now);
        self.timers = pending;

        for timer in due {
            (timer.action)(self);
        }
    }
}

fn spinner_rotation(elapsed: Duration) -> f32 {
    let step = (elapsed.as_secs_f32() * SPINNER_STEPS).floor() % SPINNER_STEPS;
    step / SPINNER_STEPS * TAU
}
