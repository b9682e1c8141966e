//! Thai Proofreader window, an egui/eframe application.
//!
//! # Architecture
//!
//! [`ProofreaderApp`] is the top-level [`eframe::App`].  It owns the
//! [`ProofreadSession`], the [`EditorState`] and two channel endpoints:
//!
//! * `command_tx`: sends [`SessionCommand`] to the [`ProofreadWorker`](crate::session::ProofreadWorker).
//! * `event_rx`: receives [`SessionEvent`] from the worker.
//!
//! # Layout
//!
//! | Area | Content |
//! |------|---------|
//! | Header | Title, tagline, model badge |
//! | Left column | Editor: text area, or highlighted view after a result |
//! | Right column | Idle hint / spinner / error box / result view |
//! | Footer | Copyright line |

use std::time::{Duration, Instant};

use chrono::Datelike;
use eframe::egui;
use egui::text::{LayoutJob, TextFormat};
use egui::{Color32, FontId, RichText, Stroke};
use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::proofread::{ChangeItem, ChangeType, Highlighter, ProofreadResult, Segment};
use crate::session::{
    EditorState, FocusRequest, LoadingState, ProofreadSession, SessionCommand, SessionEvent,
    GENERIC_ERROR_MESSAGE,
};

/// How long "Copied!" feedback stays visible.
const COPY_FEEDBACK: Duration = Duration::from_secs(2);

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

const TEXT: Color32 = Color32::from_rgb(15, 23, 42);
const MUTED: Color32 = Color32::from_rgb(100, 116, 139);
const FAINT: Color32 = Color32::from_rgb(148, 163, 184);
const BORDER: Color32 = Color32::from_rgb(226, 232, 240);
const PANEL: Color32 = Color32::WHITE;

const ERROR_TEXT: Color32 = Color32::from_rgb(185, 28, 28);
const ERROR_BG: Color32 = Color32::from_rgb(254, 226, 226);
const ERROR_UNDERLINE: Color32 = Color32::from_rgb(252, 165, 165);

const OK_TEXT: Color32 = Color32::from_rgb(22, 163, 74);
const COMMENT_BG: Color32 = Color32::from_rgb(238, 242, 255);
const COMMENT_TEXT: Color32 = Color32::from_rgb(55, 48, 163);

/// Badge colours `(text, background)` per change type.
fn badge_colors(change_type: ChangeType) -> (Color32, Color32) {
    match change_type {
        ChangeType::Spelling => (Color32::from_rgb(185, 28, 28), Color32::from_rgb(254, 242, 242)),
        ChangeType::Grammar => (Color32::from_rgb(194, 65, 12), Color32::from_rgb(255, 247, 237)),
        ChangeType::Spacing => (Color32::from_rgb(29, 78, 216), Color32::from_rgb(239, 246, 255)),
        ChangeType::Other => (Color32::from_rgb(51, 65, 85), Color32::from_rgb(248, 250, 252)),
    }
}

// ---------------------------------------------------------------------------
// Highlight layout
// ---------------------------------------------------------------------------

/// Build a [`LayoutJob`] that renders error segments with a red background
/// and underline.
pub fn highlight_job(segments: &[Segment<'_>], font_id: FontId, text_color: Color32) -> LayoutJob {
    let mut job = LayoutJob::default();
    for segment in segments {
        let format = if segment.is_error {
            TextFormat {
                font_id: font_id.clone(),
                color: ERROR_TEXT,
                background: ERROR_BG,
                underline: Stroke::new(2.0, ERROR_UNDERLINE),
                ..Default::default()
            }
        } else {
            TextFormat {
                font_id: font_id.clone(),
                color: text_color,
                ..Default::default()
            }
        };
        job.append(segment.text, 0.0, format);
    }
    job
}

// ---------------------------------------------------------------------------
// ProofreaderApp
// ---------------------------------------------------------------------------

/// eframe application: the Thai proofreading window.
pub struct ProofreaderApp {
    // ── Session ──────────────────────────────────────────────────────────
    session: ProofreadSession,
    editor: EditorState,
    /// Rebuilt whenever a new result arrives.
    highlighter: Option<Highlighter>,

    // ── Copy feedback ────────────────────────────────────────────────────
    corrected_copied_at: Option<Instant>,
    card_copied_at: Option<(usize, Instant)>,

    // ── Channels ─────────────────────────────────────────────────────────
    command_tx: mpsc::Sender<SessionCommand>,
    event_rx: mpsc::Receiver<SessionEvent>,

    // ── Configuration ────────────────────────────────────────────────────
    config: AppConfig,
    footer_year: i32,
}

impl ProofreaderApp {
    /// * `command_tx`: sender end of the worker command channel.
    /// * `event_rx`: receiver end of the worker event channel.
    /// * `config`: loaded application configuration.
    pub fn new(
        command_tx: mpsc::Sender<SessionCommand>,
        event_rx: mpsc::Receiver<SessionEvent>,
        config: AppConfig,
    ) -> Self {
        Self {
            session: ProofreadSession::new(),
            editor: EditorState::new(),
            highlighter: None,
            corrected_copied_at: None,
            card_copied_at: None,
            command_tx,
            event_rx,
            config,
            footer_year: chrono::Local::now().year(),
        }
    }

    pub fn state(&self) -> LoadingState {
        self.session.state()
    }

    // ── Session plumbing ─────────────────────────────────────────────────

    /// Start a request for the editor text, if allowed.
    pub fn submit(&mut self) {
        let Some(text) = self.editor.submit(self.session.state()) else {
            return;
        };
        if !self.session.begin() {
            return;
        }
        self.editor.sync(self.session.state(), self.session.changes());
        self.highlighter = None;
        self.corrected_copied_at = None;
        self.card_copied_at = None;

        if let Err(e) = self.command_tx.try_send(SessionCommand::Proofread { text }) {
            log::error!("could not reach proofreading worker: {e}");
            self.session.fail(GENERIC_ERROR_MESSAGE);
        }
    }

    /// Drain all pending worker events (non-blocking).
    pub fn poll_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            match event {
                SessionEvent::Completed(result) => {
                    self.highlighter = Some(Highlighter::new(&result.changes));
                    self.session.succeed(result);
                }
                SessionEvent::Failed { message } => {
                    self.session.fail(message);
                }
            }
        }
        self.editor.sync(self.session.state(), self.session.changes());
    }

    fn body_font(&self) -> FontId {
        FontId::proportional(self.config.ui.font_size)
    }

    fn copied_recently(at: Option<Instant>) -> bool {
        at.is_some_and(|t| t.elapsed() < COPY_FEEDBACK)
    }

    // ── Header / footer ──────────────────────────────────────────────────

    fn draw_header(&self, ui: &mut egui::Ui) {
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label(RichText::new("Thai Proofreader").size(20.0).strong().color(TEXT));
                ui.label(RichText::new("AI-Powered Editor").size(11.0).color(MUTED));
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    RichText::new(format!("Powered by {}", self.config.llm.model))
                        .size(12.0)
                        .color(MUTED),
                );
            });
        });
        ui.add_space(6.0);
    }

    fn draw_footer(&self, ui: &mut egui::Ui) {
        ui.add_space(4.0);
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new(format!(
                    "© {} Thai Proofreader AI. Built with Google Gemini.",
                    self.footer_year
                ))
                .size(11.0)
                .color(FAINT),
            );
        });
        ui.add_space(4.0);
    }

    fn draw_intro(&self, ui: &mut egui::Ui) {
        ui.label(RichText::new("ตรวจคำผิดภาษาไทยด้วย AI").size(26.0).strong().color(TEXT));
        ui.label(
            RichText::new("Professional Thai proofreading that preserves your unique tone and style.")
                .size(14.0)
                .color(MUTED),
        );
        ui.add_space(12.0);
    }

    // ── Editor (left column) ─────────────────────────────────────────────

    fn draw_editor(&mut self, ui: &mut egui::Ui) {
        let state = self.session.state();
        let busy = state.is_busy();

        card_frame().show(ui, |ui| {
            // Toolbar
            ui.horizontal(|ui| {
                ui.label(RichText::new("Original Text").strong().color(TEXT));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if self.editor.is_editing() {
                        let label = if busy { "Checking..." } else { "Proofread" };
                        let clicked = ui
                            .add_enabled(self.editor.can_submit(state), egui::Button::new(label))
                            .clicked();
                        if busy {
                            ui.spinner();
                        }
                        if clicked {
                            self.submit();
                        }
                    } else if ui.button("Edit").clicked() {
                        self.editor.switch_to_edit();
                    }

                    ui.separator();

                    if ui
                        .add_enabled(!busy, egui::Button::new("ลบ"))
                        .on_hover_text("Clear all text")
                        .clicked()
                    {
                        self.editor.clear();
                    }
                });
            });
            ui.separator();

            egui::ScrollArea::vertical()
                .id_salt("editor_scroll")
                .auto_shrink([false, false])
                .max_height(460.0)
                .show(ui, |ui| {
                    if self.editor.is_editing() {
                        self.draw_text_area(ui, busy);
                    } else {
                        self.draw_highlighted(ui);
                    }
                });

            ui.separator();
            ui.horizontal(|ui| {
                ui.label(RichText::new(state.label()).size(10.0).color(FAINT));
                if let (false, Some(h)) = (self.editor.is_editing(), &self.highlighter) {
                    let marked = h.count_matches(&self.editor.text);
                    ui.label(
                        RichText::new(format!("· {marked} highlighted"))
                            .size(10.0)
                            .color(ERROR_TEXT),
                    );
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        RichText::new(format!("{} Characters", self.editor.char_count()))
                            .size(10.0)
                            .strong()
                            .color(FAINT),
                    );
                });
            });
        });
    }

    fn draw_text_area(&mut self, ui: &mut egui::Ui, busy: bool) {
        let focus = self.editor.take_focus_request();
        let font = self.body_font();

        ui.add_enabled_ui(!busy, |ui| {
            let mut output = egui::TextEdit::multiline(&mut self.editor.text)
                .hint_text("วางข้อความภาษาไทยที่คุณต้องการตรวจสอบที่นี่...")
                .font(font)
                .frame(false)
                .desired_width(f32::INFINITY)
                .desired_rows(16)
                .show(ui);

            match focus {
                Some(FocusRequest::Focus) => output.response.request_focus(),
                Some(FocusRequest::FocusAtEnd) => {
                    output.response.request_focus();
                    let end = egui::text::CCursor::new(self.editor.char_count());
                    output
                        .state
                        .cursor
                        .set_char_range(Some(egui::text::CCursorRange::one(end)));
                    output.state.store(ui.ctx(), output.response.id);
                }
                None => {}
            }
        });
    }

    fn draw_highlighted(&mut self, ui: &mut egui::Ui) {
        let job = {
            let segments = match &self.highlighter {
                Some(h) => h.segments(&self.editor.text),
                None => vec![],
            };
            highlight_job(&segments, self.body_font(), TEXT)
        };

        let response = ui
            .add(egui::Label::new(job).sense(egui::Sense::click()))
            .on_hover_text("Click text to edit");
        if response.clicked() {
            self.editor.switch_to_edit();
        }
    }

    // ── Result pane (right column) ───────────────────────────────────────

    fn draw_output(&mut self, ui: &mut egui::Ui) {
        match self.session.state() {
            LoadingState::Idle => draw_idle(ui),
            LoadingState::Loading => draw_loading(ui),
            LoadingState::Error => {
                let message = self.session.error().unwrap_or(GENERIC_ERROR_MESSAGE);
                draw_error(ui, message);
            }
            LoadingState::Success => {
                if let Some(result) = self.session.result().cloned() {
                    self.draw_result(ui, &result);
                }
            }
        }
    }

    fn draw_result(&mut self, ui: &mut egui::Ui, result: &ProofreadResult) {
        egui::ScrollArea::vertical()
            .id_salt("result_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                // Corrected text
                card_frame().show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("Corrected Text").strong().color(TEXT));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            let copied = Self::copied_recently(self.corrected_copied_at);
                            let label = if copied { "Copied!" } else { "Copy Text" };
                            if ui.button(label).clicked() {
                                ui.ctx().copy_text(result.corrected_text.clone());
                                self.corrected_copied_at = Some(Instant::now());
                            }
                        });
                    });
                    ui.separator();
                    ui.add(
                        egui::Label::new(
                            RichText::new(&result.corrected_text)
                                .font(self.body_font())
                                .color(TEXT),
                        )
                        .wrap(),
                    );
                    ui.add_space(120.0);
                });

                ui.add_space(10.0);

                // Overall comment
                egui::Frame::new()
                    .fill(COMMENT_BG)
                    .corner_radius(egui::CornerRadius::same(8))
                    .inner_margin(egui::Margin::same(10))
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.label(
                            RichText::new("Comment from AI Editor")
                                .strong()
                                .size(13.0)
                                .color(COMMENT_TEXT),
                        );
                        ui.label(RichText::new(&result.overall_comment).size(12.0).color(COMMENT_TEXT));
                    });

                ui.add_space(14.0);

                // Changes
                ui.label(
                    RichText::new(format!("Detailed Changes ({})", result.changes.len()))
                        .strong()
                        .color(TEXT),
                );
                ui.add_space(6.0);

                if result.is_clean() {
                    draw_no_issues(ui);
                } else {
                    for (index, change) in result.changes.iter().enumerate() {
                        self.draw_change_card(ui, index, change);
                        ui.add_space(6.0);
                    }
                }
            });
    }

    fn draw_change_card(&mut self, ui: &mut egui::Ui, index: usize, change: &ChangeItem) {
        card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());

            ui.horizontal(|ui| {
                let (fg, bg) = badge_colors(change.change_type);
                ui.label(
                    RichText::new(change.change_type.label())
                        .size(11.0)
                        .strong()
                        .color(fg)
                        .background_color(bg),
                );

                if change.is_copyable() {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let copied = matches!(
                            self.card_copied_at,
                            Some((i, t)) if i == index && t.elapsed() < COPY_FEEDBACK
                        );
                        let label = if copied { "Copied!" } else { "Copy" };
                        if ui
                            .small_button(label)
                            .on_hover_text("Copy corrected word")
                            .clicked()
                        {
                            ui.ctx().copy_text(change.corrected.clone());
                            self.card_copied_at = Some((index, Instant::now()));
                        }
                    });
                }
            });

            ui.horizontal_wrapped(|ui| {
                ui.label(
                    RichText::new(change.original_display())
                        .font(self.body_font())
                        .strikethrough()
                        .color(ERROR_TEXT),
                );
                ui.label(RichText::new("→").color(FAINT));
                ui.label(
                    RichText::new(change.corrected_display())
                        .font(self.body_font())
                        .strong()
                        .color(OK_TEXT),
                );
            });

            ui.label(RichText::new(&change.explanation).size(12.0).color(MUTED));
        });
    }
}

// ---------------------------------------------------------------------------
// Stateless panels
// ---------------------------------------------------------------------------

fn card_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(PANEL)
        .stroke(Stroke::new(1.0, BORDER))
        .corner_radius(egui::CornerRadius::same(10))
        .inner_margin(egui::Margin::same(12))
}

fn draw_idle(ui: &mut egui::Ui) {
    ui.add_space(80.0);
    ui.vertical_centered(|ui| {
        ui.label(RichText::new("👋").size(36.0));
        ui.add_space(8.0);
        ui.label(
            RichText::new("Enter your text on the left to start proofreading.")
                .size(14.0)
                .color(FAINT),
        );
    });
}

fn draw_loading(ui: &mut egui::Ui) {
    ui.add_space(100.0);
    ui.vertical_centered(|ui| {
        ui.add(egui::Spinner::new().size(36.0));
        ui.add_space(12.0);
        ui.label(
            RichText::new("กำลังหาคำผิดให้อยู่นะควัฟ")
                .size(20.0)
                .strong()
                .color(TEXT),
        );
    });
}

fn draw_error(ui: &mut egui::Ui, message: &str) {
    egui::Frame::new()
        .fill(Color32::from_rgb(254, 242, 242))
        .stroke(Stroke::new(1.0, ERROR_BG))
        .corner_radius(egui::CornerRadius::same(10))
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new("⚠ Error").strong().color(ERROR_TEXT));
            ui.label(RichText::new(message).size(13.0).color(ERROR_TEXT));
        });
}

fn draw_no_issues(ui: &mut egui::Ui) {
    egui::Frame::new()
        .fill(Color32::from_rgb(248, 250, 252))
        .stroke(Stroke::new(1.0, BORDER))
        .corner_radius(egui::CornerRadius::same(10))
        .inner_margin(egui::Margin::same(16))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(RichText::new("✔").size(22.0).color(OK_TEXT));
                ui.label(
                    RichText::new("No issues found! Your text looks great.")
                        .size(13.0)
                        .color(FAINT),
                );
            });
        });
}

// ---------------------------------------------------------------------------
// eframe::App impl
// ---------------------------------------------------------------------------

impl eframe::App for ProofreaderApp {
    /// Called every frame by eframe.  Polls the worker, then renders.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_events();

        // Keep polling while a request is in flight or copy feedback is shown.
        if self.session.state().is_busy() {
            ctx.request_repaint_after(Duration::from_millis(66));
        } else if Self::copied_recently(self.corrected_copied_at)
            || Self::copied_recently(self.card_copied_at.map(|(_, t)| t))
        {
            ctx.request_repaint_after(Duration::from_millis(250));
        }

        egui::TopBottomPanel::top("header").show(ctx, |ui| self.draw_header(ui));
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| self.draw_footer(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_intro(ui);
            ui.columns(2, |columns| {
                self.draw_editor(&mut columns[0]);
                self.draw_output(&mut columns[1]);
            });
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        log::info!("Thai Proofreader closing");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
