// src/ui/panel.rs
//! Live parameter panel
//!
//! A [`ParameterPanel`] is a list of named folders, each holding controls
//! bound to fields of a target `T` through typed [`Binding`]s. Edits made in
//! the ImGui window and programmatic [`ParameterPanel::write`] calls go
//! through the same path: the value is constrained, written to the target,
//! and the control's `on_change` hook runs before the call returns.

use thiserror::Error;

use crate::gfx::color::Color;

use super::binding::{Binding, ControlKind, ControlValue, SliderRange};

#[derive(Debug, Error, PartialEq)]
pub enum PanelError {
    #[error("no folder named '{0}'")]
    UnknownFolder(String),
    #[error("folder '{folder}' has no control '{label}'")]
    UnknownControl { folder: String, label: String },
    #[error("control '{label}' is a {expected}, cannot accept {found:?}")]
    KindMismatch {
        label: String,
        expected: ControlKind,
        found: ControlValue,
    },
}

enum Accessor<T> {
    Toggle(Binding<T, bool>),
    Slider(Binding<T, f32>, SliderRange),
    Number(Binding<T, f32>),
    Color(Binding<T, Color>),
}

type ChangeHook<T> = Box<dyn Fn(&mut T)>;

/// One bound control inside a folder.
pub struct Control<T> {
    label: String,
    accessor: Accessor<T>,
    on_change: Option<ChangeHook<T>>,
}

impl<T> Control<T> {
    fn new(label: &str, accessor: Accessor<T>) -> Self {
        Self {
            label: label.to_string(),
            accessor,
            on_change: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> ControlKind {
        match self.accessor {
            Accessor::Toggle(_) => ControlKind::Toggle,
            Accessor::Slider(..) => ControlKind::Slider,
            Accessor::Number(_) => ControlKind::Number,
            Accessor::Color(_) => ControlKind::Color,
        }
    }

    pub fn range(&self) -> Option<SliderRange> {
        match self.accessor {
            Accessor::Slider(_, range) => Some(range),
            _ => None,
        }
    }

    /// Runs `hook` on the target after every write through this control.
    pub fn on_change(&mut self, hook: impl Fn(&mut T) + 'static) -> &mut Self {
        self.on_change = Some(Box::new(hook));
        self
    }

    /// Current value of the bound field.
    pub fn read(&self, target: &T) -> ControlValue {
        match &self.accessor {
            Accessor::Toggle(b) => ControlValue::Bool(b.get(target)),
            Accessor::Slider(b, _) | Accessor::Number(b) => ControlValue::Number(b.get(target)),
            Accessor::Color(b) => ControlValue::from_color(b.get(target)),
        }
    }

    /// Writes `value` into the bound field, then fires `on_change`.
    pub fn write(&self, target: &mut T, value: ControlValue) -> Result<(), PanelError> {
        match (&self.accessor, value) {
            (Accessor::Toggle(b), ControlValue::Bool(v)) => b.set(target, v),
            (Accessor::Slider(b, range), ControlValue::Number(v)) => {
                b.set(target, range.constrain(v))
            }
            (Accessor::Number(b), ControlValue::Number(v)) => b.set(target, v),
            (Accessor::Color(b), ControlValue::Color(hex)) => b.set(target, Color::from_hex(hex)),
            (_, found) => {
                return Err(PanelError::KindMismatch {
                    label: self.label.clone(),
                    expected: self.kind(),
                    found,
                })
            }
        }
        self.changed(target);
        Ok(())
    }

    fn changed(&self, target: &mut T) {
        if let Some(hook) = &self.on_change {
            hook(target);
        }
    }

    /// Draws the widget; returns true when the user edited the value.
    fn draw(&self, ui: &imgui::Ui, target: &mut T) -> bool {
        let edited = match &self.accessor {
            Accessor::Toggle(b) => {
                let mut value = b.get(target);
                let edited = ui.checkbox(&self.label, &mut value);
                if edited {
                    b.set(target, value);
                }
                edited
            }
            Accessor::Slider(b, range) => {
                let mut value = b.get(target);
                let edited = ui
                    .slider_config(&self.label, range.min, range.max)
                    .display_format("%.3f")
                    .build(&mut value);
                if edited {
                    b.set(target, range.constrain(value));
                }
                edited
            }
            Accessor::Number(b) => {
                let mut value = b.get(target);
                let edited = ui.input_float(&self.label, &mut value).build() && value.is_finite();
                if edited {
                    b.set(target, value);
                }
                edited
            }
            Accessor::Color(b) => {
                let mut srgb = b.get(target).to_srgb();
                let edited = ui.color_edit3(&self.label, &mut srgb);
                if edited {
                    b.set(target, Color::from_srgb(srgb));
                }
                edited
            }
        };
        if edited {
            log::trace!("panel: '{}' edited", self.label);
            self.changed(target);
        }
        edited
    }
}

/// Named group of controls.
pub struct Folder<T> {
    name: String,
    open: bool,
    controls: Vec<Control<T>>,
}

impl<T> Folder<T> {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            open: false,
            controls: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Expands the folder when the panel is first shown.
    pub fn open(&mut self) -> &mut Self {
        self.open = true;
        self
    }

    pub fn controls(&self) -> &[Control<T>] {
        &self.controls
    }

    pub fn control(&self, label: &str) -> Option<&Control<T>> {
        self.controls.iter().find(|c| c.label == label)
    }

    fn push(&mut self, control: Control<T>) -> &mut Control<T> {
        self.controls.push(control);
        let last = self.controls.len() - 1;
        &mut self.controls[last]
    }

    pub fn add_toggle(
        &mut self,
        label: &str,
        get: impl Fn(&T) -> bool + 'static,
        set: impl Fn(&mut T, bool) + 'static,
    ) -> &mut Control<T> {
        self.push(Control::new(label, Accessor::Toggle(Binding::new(get, set))))
    }

    pub fn add_slider(
        &mut self,
        label: &str,
        range: SliderRange,
        get: impl Fn(&T) -> f32 + 'static,
        set: impl Fn(&mut T, f32) + 'static,
    ) -> &mut Control<T> {
        self.push(Control::new(
            label,
            Accessor::Slider(Binding::new(get, set), range),
        ))
    }

    /// Unbounded numeric entry.
    pub fn add_number(
        &mut self,
        label: &str,
        get: impl Fn(&T) -> f32 + 'static,
        set: impl Fn(&mut T, f32) + 'static,
    ) -> &mut Control<T> {
        self.push(Control::new(label, Accessor::Number(Binding::new(get, set))))
    }

    pub fn add_color(
        &mut self,
        label: &str,
        get: impl Fn(&T) -> Color + 'static,
        set: impl Fn(&mut T, Color) + 'static,
    ) -> &mut Control<T> {
        self.push(Control::new(label, Accessor::Color(Binding::new(get, set))))
    }
}

/// Tree of folders editing a target of type `T`.
pub struct ParameterPanel<T> {
    title: String,
    folders: Vec<Folder<T>>,
}

impl<T> ParameterPanel<T> {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            folders: Vec::new(),
        }
    }

    pub fn add_folder(&mut self, name: &str) -> &mut Folder<T> {
        self.folders.push(Folder::new(name));
        let last = self.folders.len() - 1;
        &mut self.folders[last]
    }

    pub fn folders(&self) -> &[Folder<T>] {
        &self.folders
    }

    pub fn folder(&self, name: &str) -> Option<&Folder<T>> {
        self.folders.iter().find(|f| f.name == name)
    }

    fn control(&self, folder: &str, label: &str) -> Result<&Control<T>, PanelError> {
        let f = self
            .folder(folder)
            .ok_or_else(|| PanelError::UnknownFolder(folder.to_string()))?;
        f.control(label).ok_or_else(|| PanelError::UnknownControl {
            folder: folder.to_string(),
            label: label.to_string(),
        })
    }

    pub fn read(&self, target: &T, folder: &str, label: &str) -> Result<ControlValue, PanelError> {
        Ok(self.control(folder, label)?.read(target))
    }

    /// Same effect as the user editing the control.
    pub fn write(
        &self,
        target: &mut T,
        folder: &str,
        label: &str,
        value: ControlValue,
    ) -> Result<(), PanelError> {
        self.control(folder, label)?.write(target, value)
    }

    /// Draws the panel anchored to the top-right corner. Returns true if any
    /// control was edited this frame.
    pub fn draw(&self, ui: &imgui::Ui, target: &mut T) -> bool {
        let display_size = ui.io().display_size;
        if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
            return false;
        }

        let width = 300.0_f32.min(display_size[0]);
        let mut edited = false;
        ui.window(&self.title)
            .size([width, display_size[1] * 0.8], imgui::Condition::FirstUseEver)
            .position([display_size[0] - width, 0.0], imgui::Condition::FirstUseEver)
            .collapsible(true)
            .build(|| {
                for folder in &self.folders {
                    let flags = if folder.open {
                        imgui::TreeNodeFlags::DEFAULT_OPEN
                    } else {
                        imgui::TreeNodeFlags::empty()
                    };
                    let _id = ui.push_id(folder.name.as_str());
                    if ui.collapsing_header(&folder.name, flags) {
                        for control in &folder.controls {
                            edited |= control.draw(ui, target);
                        }
                    }
                }
            });
        edited
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Lamp {
        on: bool,
        brightness: f32,
        color: Color,
        refreshes: u32,
    }

    fn panel() -> ParameterPanel<Lamp> {
        let mut panel = ParameterPanel::new("Test");
        let folder = panel.add_folder("Lamp");
        folder.add_toggle("enable", |l: &Lamp| l.on, |l, v| l.on = v);
        folder
            .add_slider(
                "brightness",
                SliderRange::new(0.0, 1.0, 0.001),
                |l: &Lamp| l.brightness,
                |l, v| l.brightness = v,
            )
            .on_change(|l| l.refreshes += 1);
        folder.add_color("color", |l: &Lamp| l.color, |l, v| l.color = v);
        folder.open();
        panel
    }

    #[test]
    fn test_every_kind_round_trips() {
        let panel = panel();
        let mut lamp = Lamp::default();

        panel
            .write(&mut lamp, "Lamp", "enable", ControlValue::Bool(true))
            .unwrap();
        assert!(lamp.on);
        assert_eq!(panel.read(&lamp, "Lamp", "enable").unwrap(), ControlValue::Bool(true));

        panel
            .write(&mut lamp, "Lamp", "brightness", ControlValue::Number(0.25))
            .unwrap();
        assert_eq!(lamp.brightness, 0.25);
        assert_eq!(
            panel.read(&lamp, "Lamp", "brightness").unwrap(),
            ControlValue::Number(0.25)
        );

        panel
            .write(&mut lamp, "Lamp", "color", ControlValue::Color(0xff8000))
            .unwrap();
        assert_eq!(lamp.color, Color::from_hex(0xff8000));
        assert_eq!(
            panel.read(&lamp, "Lamp", "color").unwrap(),
            ControlValue::Color(0xff8000)
        );
    }

    #[test]
    fn test_slider_write_is_constrained() {
        let panel = panel();
        let mut lamp = Lamp::default();
        panel
            .write(&mut lamp, "Lamp", "brightness", ControlValue::Number(2.0))
            .unwrap();
        assert_eq!(lamp.brightness, 1.0);
    }

    #[test]
    fn test_on_change_runs_after_write() {
        let panel = panel();
        let mut lamp = Lamp::default();
        panel
            .write(&mut lamp, "Lamp", "brightness", ControlValue::Number(0.5))
            .unwrap();
        panel
            .write(&mut lamp, "Lamp", "enable", ControlValue::Bool(true))
            .unwrap();
        assert_eq!(lamp.refreshes, 1);
    }

    #[test]
    fn test_errors() {
        let panel = panel();
        let mut lamp = Lamp::default();

        assert_eq!(
            panel.read(&lamp, "Nope", "enable"),
            Err(PanelError::UnknownFolder("Nope".into()))
        );
        assert!(matches!(
            panel.read(&lamp, "Lamp", "nope"),
            Err(PanelError::UnknownControl { .. })
        ));

        let err = panel
            .write(&mut lamp, "Lamp", "enable", ControlValue::Number(1.0))
            .unwrap_err();
        assert!(matches!(
            err,
            PanelError::KindMismatch {
                expected: ControlKind::Toggle,
                ..
            }
        ));
        assert!(!lamp.on);
    }

    #[test]
    fn test_folder_bookkeeping() {
        let panel = panel();
        let folder = panel.folder("Lamp").unwrap();
        assert!(folder.is_open());
        assert_eq!(folder.controls().len(), 3);
        assert_eq!(folder.control("brightness").unwrap().kind(), ControlKind::Slider);
        assert_eq!(
            folder.control("brightness").unwrap().range(),
            Some(SliderRange::new(0.0, 1.0, 0.001))
        );
    }
}
