//! Sky texture set, loaded once at startup into an [`AssetBundle`].
//!
//! Loading never fails as a whole: a texture that cannot be read is logged and
//! replaced by a 1x1 white placeholder so the frame path never waits on assets.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

pub const CLOUD_TEXTURE_FILES: [&str; 4] = ["cloud1.png", "cloud2.png", "cloud3.png", "cloud4.png"];
pub const MOON_TEXTURE_FILE: &str = "moon2.png";
pub const STAR_TEXTURE_FILE: &str = "star3.png";
pub const NOISE_TEXTURE_FILE: &str = "noise.png";
pub const GALAXY_TEXTURE_FILE: &str = "galaxy.png";
pub const NOISE2_TEXTURE_FILE: &str = "noise2.png";
pub const FLARE_MAIN_TEXTURE_FILE: &str = "Flare32.png";
pub const FLARE_GHOST_TEXTURE_FILE: &str = "lensflare3.png";

/// Errors from decoding a single texture.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The image could not be opened or decoded.
    #[error("failed to load texture {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Width or height is zero.
    #[error("texture {path} has zero dimensions")]
    ZeroDimensions { path: PathBuf },
}

/// Texture addressing outside `[0, 1]` UVs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum WrapMode {
    #[default]
    ClampToEdge,
    Repeat,
}

impl WrapMode {
    pub fn to_wgpu(self) -> wgpu::AddressMode {
        match self {
            WrapMode::ClampToEdge => wgpu::AddressMode::ClampToEdge,
            WrapMode::Repeat => wgpu::AddressMode::Repeat,
        }
    }
}

/// Decoded RGBA8 pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// CPU-side texture shared between renderers.
#[derive(Debug)]
pub struct Texture {
    pub name: String,
    pub image: DecodedImage,
    pub wrap: WrapMode,
    placeholder: bool,
}

/// Cheap, clonable handle to a loaded texture.
#[derive(Clone, Debug)]
pub struct TextureHandle(Arc<Texture>);

impl TextureHandle {
    pub fn new(name: impl Into<String>, image: DecodedImage, wrap: WrapMode) -> Self {
        Self(Arc::new(Texture {
            name: name.into(),
            image,
            wrap,
            placeholder: false,
        }))
    }

    /// 1x1 opaque white stand-in for a texture that failed to load.
    pub fn placeholder(name: impl Into<String>, wrap: WrapMode) -> Self {
        Self(Arc::new(Texture {
            name: name.into(),
            image: DecodedImage {
                width: 1,
                height: 1,
                rgba: vec![255; 4],
            },
            wrap,
            placeholder: true,
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn wrap(&self) -> WrapMode {
        self.0.wrap
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.0.image.width, self.0.image.height)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.0.image.rgba
    }

    pub fn is_placeholder(&self) -> bool {
        self.0.placeholder
    }
}

impl PartialEq for TextureHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Source of decoded texture data.
pub trait TextureLoader {
    fn load(&self, path: &Path) -> Result<DecodedImage, AssetError>;
}

/// Loads textures from disk with the `image` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct ImageTextureLoader;

impl TextureLoader for ImageTextureLoader {
    fn load(&self, path: &Path) -> Result<DecodedImage, AssetError> {
        let rgba = image::open(path)
            .map_err(|source| AssetError::Image {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(AssetError::ZeroDimensions {
                path: path.to_path_buf(),
            });
        }
        Ok(DecodedImage {
            width,
            height,
            rgba: rgba.into_raw(),
        })
    }
}

/// Every texture the sky, clouds, moon, and lens flare sample.
#[derive(Clone, Debug)]
pub struct AssetBundle {
    pub clouds: [TextureHandle; 4],
    pub moon: TextureHandle,
    pub star: TextureHandle,
    pub noise: TextureHandle,
    pub galaxy: TextureHandle,
    pub noise2: TextureHandle,
    pub flare_main: TextureHandle,
    pub flare_ghost: TextureHandle,
}

impl AssetBundle {
    /// Load the full texture set from `base_path`.
    pub fn load(loader: &impl TextureLoader, base_path: &Path) -> Self {
        let load = |file: &str, wrap: WrapMode| load_or_placeholder(loader, base_path, file, wrap);

        let bundle = Self {
            clouds: CLOUD_TEXTURE_FILES.map(|file| load(file, WrapMode::ClampToEdge)),
            moon: load(MOON_TEXTURE_FILE, WrapMode::ClampToEdge),
            star: load(STAR_TEXTURE_FILE, WrapMode::Repeat),
            noise: load(NOISE_TEXTURE_FILE, WrapMode::Repeat),
            galaxy: load(GALAXY_TEXTURE_FILE, WrapMode::ClampToEdge),
            noise2: load(NOISE2_TEXTURE_FILE, WrapMode::Repeat),
            flare_main: load(FLARE_MAIN_TEXTURE_FILE, WrapMode::ClampToEdge),
            flare_ghost: load(FLARE_GHOST_TEXTURE_FILE, WrapMode::ClampToEdge),
        };

        let missing = bundle.iter().filter(|t| t.is_placeholder()).count();
        log::info!(
            "Loaded sky assets from {} ({} textures, {missing} placeholders)",
            base_path.display(),
            bundle.iter().count()
        );
        bundle
    }

    /// Bundle made entirely of placeholders, for headless runs.
    pub fn placeholders() -> Self {
        Self {
            clouds: CLOUD_TEXTURE_FILES.map(|file| TextureHandle::placeholder(file, WrapMode::ClampToEdge)),
            moon: TextureHandle::placeholder(MOON_TEXTURE_FILE, WrapMode::ClampToEdge),
            star: TextureHandle::placeholder(STAR_TEXTURE_FILE, WrapMode::Repeat),
            noise: TextureHandle::placeholder(NOISE_TEXTURE_FILE, WrapMode::Repeat),
            galaxy: TextureHandle::placeholder(GALAXY_TEXTURE_FILE, WrapMode::ClampToEdge),
            noise2: TextureHandle::placeholder(NOISE2_TEXTURE_FILE, WrapMode::Repeat),
            flare_main: TextureHandle::placeholder(FLARE_MAIN_TEXTURE_FILE, WrapMode::ClampToEdge),
            flare_ghost: TextureHandle::placeholder(FLARE_GHOST_TEXTURE_FILE, WrapMode::ClampToEdge),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &TextureHandle> {
        self.clouds.iter().chain([
            &self.moon,
            &self.star,
            &self.noise,
            &self.galaxy,
            &self.noise2,
            &self.flare_main,
            &self.flare_ghost,
        ])
    }
}

fn load_or_placeholder(
    loader: &impl TextureLoader,
    base_path: &Path,
    file: &str,
    wrap: WrapMode,
) -> TextureHandle {
    match loader.load(&base_path.join(file)) {
        Ok(image) => TextureHandle::new(file, image, wrap),
        Err(e) => {
            log::warn!("{e}; using placeholder");
            TextureHandle::placeholder(file, wrap)
        }
    }
}
