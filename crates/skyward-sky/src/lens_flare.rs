//! Sun light with an attached lens-flare rig.
//!
//! The rig is a point light plus an ordered list of sprite elements laid out
//! along the line from the light's screen position through the screen centre.
//! It is shown only while the sun is above the horizon.

use glam::{Mat4, Vec2, Vec3, Vec4};

use crate::assets::{AssetBundle, TextureHandle};
use crate::celestial::CelestialState;
use crate::color::Rgb;

/// Sun point light color.
pub const SUN_LIGHT_COLOR: u32 = 0xffffff;
/// Sun point light intensity.
pub const SUN_LIGHT_INTENSITY: f32 = 100.0;
/// Sun point light range.
pub const SUN_LIGHT_DISTANCE: f32 = 2000.0;

/// A point light in app-local space.
#[derive(Clone, Debug, PartialEq)]
pub struct PointLight {
    pub color: Rgb,
    pub intensity: f32,
    /// Range; zero means unlimited.
    pub distance: f32,
    pub position: Vec3,
    pub visible: bool,
}

/// One sprite of the flare.
#[derive(Clone, Debug, PartialEq)]
pub struct FlareElement {
    pub texture: TextureHandle,
    /// Sprite size in pixels.
    pub size: f32,
    /// Position along the flare axis: 0 at the light, 1 mirrored through the centre.
    pub distance: f32,
    /// Tint; `None` renders the texture untinted.
    pub color: Option<Rgb>,
    pub opacity: f32,
    /// Sprite rotation in radians.
    pub rotation: f32,
}

impl FlareElement {
    pub fn new(texture: TextureHandle, size: f32, distance: f32) -> Self {
        Self {
            texture,
            size,
            distance,
            color: None,
            opacity: 1.0,
            rotation: 0.0,
        }
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Screen position of this element given the light's NDC position.
    pub fn screen_position(&self, light_ndc: Vec2) -> Vec2 {
        light_ndc + (-2.0 * light_ndc) * self.distance
    }
}

/// A flare element resolved to screen space for drawing.
#[derive(Clone, Debug, PartialEq)]
pub struct FlareSprite {
    /// Centre in normalized device coordinates.
    pub center: Vec2,
    pub size: f32,
    pub rotation: f32,
    pub color: Rgb,
    pub opacity: f32,
    pub texture: TextureHandle,
}

/// Whether the sun and its flare are drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SunVisibility {
    Visible,
    Hidden,
}

/// Sun point light plus its flare elements.
#[derive(Clone, Debug)]
pub struct LensFlareRig {
    pub light: PointLight,
    elements: Vec<FlareElement>,
}

impl LensFlareRig {
    /// Empty rig around `light`.
    pub fn new(light: PointLight) -> Self {
        Self {
            light,
            elements: Vec::new(),
        }
    }

    /// The sun rig: a bright main flare at the light and four ghosts
    /// trailing through the screen centre. Starts hidden.
    pub fn sun(assets: &AssetBundle) -> Self {
        let light = PointLight {
            color: Rgb::from_hex(SUN_LIGHT_COLOR),
            intensity: SUN_LIGHT_INTENSITY,
            distance: SUN_LIGHT_DISTANCE,
            position: Vec3::ZERO,
            visible: false,
        };
        let main = FlareElement::new(assets.flare_main.clone(), 500.0, 0.0)
            .with_color(light.color)
            .with_opacity(0.2);

        let mut rig = Self::new(light);
        rig.add_element(main);
        for (size, distance) in [(60.0, 0.6), (70.0, 0.7), (120.0, 0.9), (70.0, 1.0)] {
            rig.add_element(FlareElement::new(assets.flare_ghost.clone(), size, distance));
        }
        rig
    }

    pub fn add_element(&mut self, element: FlareElement) {
        self.elements.push(element);
    }

    pub fn elements(&self) -> &[FlareElement] {
        &self.elements
    }

    /// The element that turns with the camera.
    pub fn main_element(&self) -> Option<&FlareElement> {
        self.elements.first()
    }

    pub fn visibility(&self) -> SunVisibility {
        if self.light.visible {
            SunVisibility::Visible
        } else {
            SunVisibility::Hidden
        }
    }

    /// Show and place the sun by day; hide it by night.
    ///
    /// A hidden rig keeps its last position.
    pub fn update(
        &mut self,
        state: &CelestialState,
        rotation_radius: f32,
        camera_roll: f32,
    ) -> SunVisibility {
        if state.is_day() {
            self.light.visible = true;
            self.light.position = state.direction * rotation_radius;
            if let Some(main) = self.elements.first_mut() {
                main.rotation = camera_roll;
            }
        } else {
            self.light.visible = false;
        }
        self.visibility()
    }

    /// Resolve the elements to screen space for a camera.
    ///
    /// `light_world` is the light's world position (app position plus the
    /// light's local position). Returns `None` while hidden, behind the
    /// camera, or off screen.
    pub fn layout(&self, light_world: Vec3, view_proj: Mat4) -> Option<Vec<FlareSprite>> {
        if !self.light.visible {
            return None;
        }
        let ndc = project_to_ndc(light_world, view_proj)?;

        Some(
            self.elements
                .iter()
                .map(|element| FlareSprite {
                    center: element.screen_position(ndc),
                    size: element.size,
                    rotation: element.rotation,
                    color: element.color.unwrap_or(Rgb::WHITE),
                    opacity: element.opacity,
                    texture: element.texture.clone(),
                })
                .collect(),
        )
    }
}

/// Project a world position to normalized device coordinates.
///
/// Returns `None` when the point is behind the camera or outside the viewport.
pub fn project_to_ndc(world: Vec3, view_proj: Mat4) -> Option<Vec2> {
    let clip = view_proj * Vec4::new(world.x, world.y, world.z, 1.0);
    if clip.w <= 0.0 {
        return None;
    }
    let ndc = Vec2::new(clip.x / clip.w, clip.y / clip.w);
    if ndc.x.abs() > 1.0 || ndc.y.abs() > 1.0 {
        return None;
    }
    Some(ndc)
}
