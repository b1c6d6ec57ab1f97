use eframe::egui;
use image::RgbaImage;
use layerart::config::{COMPLEXITY_RANGE, FONT_SIZE_RANGE, SIZE_RANGE, TRANSPARENCY_RANGE};
use layerart::{ArtConfig, Artwork, PALETTES, Shape, Style, save_png};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Instant;

const HELP_TEXT: &str = "\
The left side holds the art options. There are three layers, each with its own \
style, shape, complexity, size and transparency.

Click the lock next to an option to keep it fixed while everything else is \
randomized.

Generate: render again with the current options and a new random seed.
Generate Randomly: randomize every unlocked option, then render.
Export: save a PNG at full resolution.
Theme: switch between dark and light mode.

Styles:
  Chaotic - shapes anywhere on the canvas.
  Striped Horizontal - shapes line up in a few horizontal bands.
  Striped Vertical - the same, in vertical bands.
  Mosaic - shapes on an even grid covering the canvas.
  Cornered - shapes gather around the corners.
  Centered - shapes gather around the centre.
  Empty - the layer draws nothing.

Complexity sets how many shapes a layer draws, size how large they can get, \
and transparency how opaque the layer is.

Text Overlay puts text on top of the art. Load a TTF or OTF font, type the \
text, then adjust font size and position with the sliders. Overlay options \
don't change when randomizing or generating new art.";

/// Main application state for the art generator GUI
pub struct ArtApp {
    /// Settings, locks and seed of the current piece
    art: Artwork,
    /// Last rendered image
    output_image: Option<RgbaImage>,
    /// Texture handle for the rendered image
    output_texture: Option<egui::TextureHandle>,

    /// Re-render as soon as an option changes
    auto_render: bool,
    /// Options changed since the last render
    needs_render: bool,

    dark_mode: bool,
    show_help: bool,

    /// Last render time in milliseconds
    last_render_time_ms: f64,
    /// Error message to display (if any)
    error_message: Option<String>,

    rng: StdRng,
}

impl ArtApp {
    /// Create a new art generator application with a random first piece
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let mut rng = StdRng::from_entropy();
        let art = Artwork::random(ArtConfig::default(), &mut rng);

        Self {
            art,
            output_image: None,
            output_texture: None,
            auto_render: false,
            needs_render: true,
            dark_mode: true,
            show_help: false,
            last_render_time_ms: 0.0,
            error_message: None,
            rng,
        }
    }

    /// Render the current piece
    fn render(&mut self) {
        let start = Instant::now();
        match self.art.render() {
            Ok(output) => {
                self.last_render_time_ms = start.elapsed().as_secs_f64() * 1000.0;
                self.output_image = Some(output);
                self.output_texture = None; // Clear old texture
                self.needs_render = false;
                self.error_message = None;
            }
            Err(e) => {
                log::error!("render failed: {e}");
                self.error_message = Some(format!("Render failed: {e}"));
            }
        }
    }

    fn generate(&mut self) {
        self.art.reseed(&mut self.rng);
        self.render();
    }

    fn generate_randomly(&mut self) {
        self.art.randomize(&mut self.rng);
        self.render();
    }

    fn export(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .set_file_name("art.png")
            .save_file()
        else {
            return;
        };

        // The preview is rendered at full size, reuse it while it is current
        let saved = match (&self.output_image, self.needs_render) {
            (Some(image), false) => save_png(image, &path),
            _ => self.art.export_png(&path),
        };

        match saved {
            Ok(written) => log::info!("saved {}", written.display()),
            Err(e) => self.error_message = Some(format!("Failed to save: {e}")),
        }
    }

    fn load_font(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Fonts", &["ttf", "otf"])
            .pick_file()
        else {
            return;
        };

        match self.art.overlay.load_font_file(&path) {
            Ok(()) => self.needs_render = true,
            Err(e) => self.error_message = Some(format!("Failed to load font: {e}")),
        }
    }

    fn toggle_theme(&mut self, ctx: &egui::Context) {
        self.dark_mode = !self.dark_mode;
        ctx.set_visuals(if self.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });
    }

    /// Small lock button placed next to an option
    fn lock_toggle(ui: &mut egui::Ui, locked: &mut bool) {
        let icon = if *locked { "🔒" } else { "🔓" };
        ui.toggle_value(locked, icon)
            .on_hover_text("Keep this option when randomizing");
    }

    /// Palette dropdown and background swatches
    fn render_palette_controls(&mut self, ui: &mut egui::Ui) -> bool {
        let mut changed = false;

        ui.heading("Color Palette");
        ui.horizontal(|ui| {
            Self::lock_toggle(ui, &mut self.art.palette.palette_locked);

            let current = self.art.palette.palette().name;
            egui::ComboBox::from_id_salt("palette")
                .selected_text(current)
                .width(200.0)
                .show_ui(ui, |ui| {
                    for palette in &PALETTES {
                        if ui
                            .selectable_label(palette.name == current, palette.name)
                            .clicked()
                        {
                            if let Err(e) = self.art.palette.select(palette.name, &mut self.rng) {
                                self.error_message = Some(e.to_string());
                            }
                            changed = true;
                        }
                    }
                });
        });

        ui.horizontal_wrapped(|ui| {
            Self::lock_toggle(ui, &mut self.art.palette.background_locked);

            let palette = self.art.palette.palette();
            let selected = self.art.palette.background_index();
            for (i, color) in palette.colors.iter().enumerate() {
                let fill = egui::Color32::from_rgb(color[0], color[1], color[2]);
                let mut swatch = egui::Button::new("")
                    .fill(fill)
                    .min_size(egui::vec2(22.0, 22.0));
                if i == selected {
                    swatch = swatch.stroke(egui::Stroke::new(
                        2.0,
                        ui.visuals().selection.stroke.color,
                    ));
                }

                let response = ui
                    .add(swatch)
                    .on_hover_text(layerart::palette::to_hex(*color));
                if response.clicked() {
                    if let Err(e) = self.art.palette.set_background_index(i) {
                        self.error_message = Some(e.to_string());
                    }
                    changed = true;
                }
            }
        });
        ui.label("Background");

        changed
    }

    /// Style, shape and sliders for one layer
    fn render_layer_controls(&mut self, ui: &mut egui::Ui, index: usize) -> bool {
        let mut changed = false;
        let layer = &mut self.art.layers[index];
        let number = index + 1;

        ui.collapsing(format!("Layer {number}"), |ui| {
            ui.horizontal(|ui| {
                Self::lock_toggle(ui, &mut layer.locks.style);
                egui::ComboBox::from_id_salt(("style", index))
                    .selected_text(layer.settings.style.name())
                    .width(180.0)
                    .show_ui(ui, |ui| {
                        for style in Style::ALL {
                            changed |= ui
                                .selectable_value(&mut layer.settings.style, style, style.name())
                                .changed();
                        }
                    });
                ui.label("Style");
            });

            ui.horizontal(|ui| {
                Self::lock_toggle(ui, &mut layer.locks.shape);
                egui::ComboBox::from_id_salt(("shape", index))
                    .selected_text(layer.settings.shape.name())
                    .width(180.0)
                    .show_ui(ui, |ui| {
                        for shape in Shape::ALL {
                            changed |= ui
                                .selectable_value(&mut layer.settings.shape, shape, shape.name())
                                .changed();
                        }
                    });
                ui.label("Shape");
            });

            ui.add_space(4.0);

            ui.horizontal(|ui| {
                Self::lock_toggle(ui, &mut layer.locks.complexity);
                changed |= ui
                    .add(
                        egui::Slider::new(&mut layer.settings.complexity, COMPLEXITY_RANGE)
                            .text("Complexity"),
                    )
                    .on_hover_text("How many shapes the layer draws")
                    .changed();
            });

            ui.horizontal(|ui| {
                Self::lock_toggle(ui, &mut layer.locks.size);
                changed |= ui
                    .add(egui::Slider::new(&mut layer.settings.size, SIZE_RANGE).text("Shape Size"))
                    .on_hover_text("Largest shape size in pixels")
                    .changed();
            });

            ui.horizontal(|ui| {
                Self::lock_toggle(ui, &mut layer.locks.transparency);
                changed |= ui
                    .add(
                        egui::Slider::new(&mut layer.settings.transparency, TRANSPARENCY_RANGE)
                            .text("Transparency"),
                    )
                    .on_hover_text("Layer opacity, 0 hides the layer")
                    .changed();
            });
        });

        changed
    }

    /// Overlay text, font and placement
    fn render_overlay_controls(&mut self, ui: &mut egui::Ui) -> bool {
        let mut changed = false;
        let mut pick_font = false;
        let overlay = &mut self.art.overlay;

        ui.collapsing("Text Overlay", |ui| {
            changed |= ui
                .add(egui::TextEdit::singleline(&mut overlay.text).hint_text("Overlay text"))
                .changed();

            ui.horizontal(|ui| {
                pick_font = ui.button("Load Font...").clicked();
                ui.label(if overlay.has_font() {
                    "Font loaded"
                } else {
                    "No font"
                });
            });

            changed |= ui
                .add(egui::Slider::new(&mut overlay.font_size, FONT_SIZE_RANGE).text("Font Size"))
                .changed();
            changed |= ui
                .add(egui::Slider::new(&mut overlay.x, 0.0..=1.0).text("Position X"))
                .changed();
            changed |= ui
                .add(egui::Slider::new(&mut overlay.y, 0.0..=1.0).text("Position Y"))
                .changed();

            ui.horizontal(|ui| {
                let [r, g, b, a] = overlay.color.0;
                let mut color = egui::Color32::from_rgba_unmultiplied(r, g, b, a);
                if ui.color_edit_button_srgba(&mut color).changed() {
                    overlay.color = image::Rgba(color.to_srgba_unmultiplied());
                    changed = true;
                }
                ui.label("Text Color");
            });
        });

        if pick_font {
            self.load_font();
        }
        changed
    }

    /// Render the control panel UI
    fn render_controls(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) -> bool {
        let mut changed = self.render_palette_controls(ui);

        ui.add_space(8.0);
        ui.separator();

        for index in 0..self.art.layers.len() {
            changed |= self.render_layer_controls(ui, index);
            ui.add_space(4.0);
        }

        changed |= self.render_overlay_controls(ui);

        ui.add_space(16.0);
        ui.separator();

        ui.checkbox(&mut self.auto_render, "Auto-render")
            .on_hover_text("Render again whenever an option changes");

        ui.horizontal(|ui| {
            if ui.button("Generate").clicked() {
                self.generate();
            }
            if ui.button("Generate Randomly").clicked() {
                self.generate_randomly();
            }
        });

        ui.horizontal(|ui| {
            if ui.button("Export").clicked() {
                self.export();
            }
            if ui.button("Theme").clicked() {
                self.toggle_theme(ctx);
            }
            if ui.button("Help").clicked() {
                self.show_help = !self.show_help;
            }
        });

        if self.last_render_time_ms > 0.0 {
            ui.label(format!("Last render: {:.1} ms", self.last_render_time_ms));
        }
        ui.label(format!("Seed: {:#018x}", self.art.seed));

        changed
    }

    /// Display the rendered image scaled to fit
    fn display_image(
        ui: &mut egui::Ui,
        image: Option<&RgbaImage>,
        texture: &mut Option<egui::TextureHandle>,
    ) {
        let Some(img) = image else {
            ui.label("Nothing rendered yet");
            return;
        };

        if texture.is_none() {
            let size = [img.width() as usize, img.height() as usize];
            let color_image = egui::ColorImage::from_rgba_unmultiplied(size, img.as_raw());
            *texture = Some(ui.ctx().load_texture(
                "artwork",
                color_image,
                egui::TextureOptions::LINEAR,
            ));
        }

        if let Some(tex) = texture {
            let size = tex.size_vec2();
            let max_size = ui.available_size() - egui::vec2(0.0, 24.0);
            let scale = (max_size.x / size.x).min(max_size.y / size.y).min(1.0);

            ui.image((tex.id(), size * scale));
            ui.label(format!(
                "{}x{} (scale: {:.2}x)",
                img.width(),
                img.height(),
                scale
            ));
        }
    }
}

impl eframe::App for ArtApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Export PNG...").clicked() {
                        self.export();
                        ui.close();
                    }

                    ui.separator();

                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                if ui.button("Theme").clicked() {
                    self.toggle_theme(ctx);
                }

                if ui.button("Help").clicked() {
                    self.show_help = !self.show_help;
                }
            });
        });

        // Left panel: Controls
        egui::SidePanel::left("control_panel")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    if self.render_controls(ui, ctx) {
                        self.needs_render = true;
                    }
                });
            });

        egui::Window::new("Help")
            .open(&mut self.show_help)
            .resizable(false)
            .default_width(480.0)
            .show(ctx, |ui| {
                ui.label(HELP_TEXT);
            });

        // Central panel: Artwork
        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(ref msg) = self.error_message {
                ui.colored_label(egui::Color32::RED, msg);
                if ui.button("Clear Error").clicked() {
                    self.error_message = None;
                }
                ui.separator();
            }

            let first_frame = self.output_image.is_none();
            if self.needs_render && (self.auto_render || first_frame) {
                self.render();
            }

            ui.vertical_centered(|ui| {
                Self::display_image(ui, self.output_image.as_ref(), &mut self.output_texture);
            });
        });
    }
}
