//! Asset catalog
//!
//! The simulation never touches pixels, but its layout math depends on
//! texture sizes (scroll wrap, bird frame width, pipe hitboxes). This module
//! resolves asset files under a configurable root, validates them and reads
//! image dimensions from PNG headers.

use std::fmt;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Images the game draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageAsset {
    Background,
    Foreground,
    Bird,
    Pipe,
    GameOver,
    Scoreboard,
    Title,
}

impl ImageAsset {
    pub const ALL: [ImageAsset; 7] = [
        ImageAsset::Background,
        ImageAsset::Foreground,
        ImageAsset::Bird,
        ImageAsset::Pipe,
        ImageAsset::GameOver,
        ImageAsset::Scoreboard,
        ImageAsset::Title,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            ImageAsset::Background => "Background.png",
            ImageAsset::Foreground => "Foreground.png",
            ImageAsset::Bird => "Bird.png",
            ImageAsset::Pipe => "Pipe.png",
            ImageAsset::GameOver => "GameOver.png",
            ImageAsset::Scoreboard => "Scoreboard.png",
            ImageAsset::Title => "Title.png",
        }
    }
}

/// Sound clips the game plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundAsset {
    Hit,
    Jump,
    Point,
    Music,
}

impl SoundAsset {
    pub const ALL: [SoundAsset; 4] = [
        SoundAsset::Hit,
        SoundAsset::Jump,
        SoundAsset::Point,
        SoundAsset::Music,
    ];

    pub fn file_name(&self) -> &'static str {
        match self {
            SoundAsset::Hit => "hit.wav",
            SoundAsset::Jump => "jump.wav",
            SoundAsset::Point => "point.wav",
            SoundAsset::Music => "music.wav",
        }
    }
}

/// Failure resolving or validating an asset file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetLoadError {
    /// File does not exist
    Missing { path: PathBuf },
    /// File exists but could not be read
    Unreadable { path: PathBuf, reason: String },
    /// File is not a usable image (bad signature, zero size)
    InvalidImage { path: PathBuf, reason: String },
}

impl AssetLoadError {
    pub fn path(&self) -> &Path {
        match self {
            Self::Missing { path } | Self::Unreadable { path, .. } | Self::InvalidImage { path, .. } => {
                path
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Missing { .. } => "missing",
            Self::Unreadable { .. } => "unreadable",
            Self::InvalidImage { .. } => "invalid_image",
        }
    }
}

impl fmt::Display for AssetLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { path } => write!(f, "asset not found: {}", path.display()),
            Self::Unreadable { path, reason } => {
                write!(f, "cannot read asset {}: {}", path.display(), reason)
            }
            Self::InvalidImage { path, reason } => {
                write!(f, "invalid image {}: {}", path.display(), reason)
            }
        }
    }
}

impl std::error::Error for AssetLoadError {}

/// Texture dimensions the simulation and renderer lay out against
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteMetrics {
    pub background: Vec2,
    pub foreground: Vec2,
    /// Whole bird sheet (three animation frames side by side)
    pub bird: Vec2,
    pub pipe: Vec2,
    pub game_over: Vec2,
    pub scoreboard: Vec2,
    pub title: Vec2,
}

impl Default for SpriteMetrics {
    fn default() -> Self {
        Self {
            background: Vec2::new(144.0, 256.0),
            foreground: Vec2::new(168.0, 56.0),
            bird: Vec2::new(150.0, 48.0),
            pipe: Vec2::new(26.0, 160.0),
            game_over: Vec2::new(96.0, 21.0),
            scoreboard: Vec2::new(113.0, 57.0),
            title: Vec2::new(89.0, 24.0),
        }
    }
}

impl SpriteMetrics {
    /// Width of one bird animation frame
    pub fn bird_frame_width(&self) -> f32 {
        self.bird.x / 3.0
    }

    /// Size of a single bird frame
    pub fn bird_frame(&self) -> Vec2 {
        Vec2::new(self.bird_frame_width(), self.bird.y)
    }

    pub fn size_of(&self, image: ImageAsset) -> Vec2 {
        match image {
            ImageAsset::Background => self.background,
            ImageAsset::Foreground => self.foreground,
            ImageAsset::Bird => self.bird,
            ImageAsset::Pipe => self.pipe,
            ImageAsset::GameOver => self.game_over,
            ImageAsset::Scoreboard => self.scoreboard,
            ImageAsset::Title => self.title,
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn set(&mut self, image: ImageAsset, size: Vec2) {
        let slot = match image {
            ImageAsset::Background => &mut self.background,
            ImageAsset::Foreground => &mut self.foreground,
            ImageAsset::Bird => &mut self.bird,
            ImageAsset::Pipe => &mut self.pipe,
            ImageAsset::GameOver => &mut self.game_over,
            ImageAsset::Scoreboard => &mut self.scoreboard,
            ImageAsset::Title => &mut self.title,
        };
        *slot = size;
    }
}

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Read width/height from the IHDR chunk of a PNG header
pub fn png_dimensions(path: &Path, header: &[u8]) -> Result<(u32, u32), AssetLoadError> {
    let invalid = |reason: &str| AssetLoadError::InvalidImage {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    if header.len() < 24 {
        return Err(invalid("truncated header"));
    }
    if header[..8] != PNG_SIGNATURE {
        return Err(invalid("not a PNG file"));
    }
    if &header[12..16] != b"IHDR" {
        return Err(invalid("missing IHDR chunk"));
    }

    let width = u32::from_be_bytes([header[16], header[17], header[18], header[19]]);
    let height = u32::from_be_bytes([header[20], header[21], header[22], header[23]]);
    if width == 0 || height == 0 {
        return Err(invalid("zero-sized image"));
    }
    Ok((width, height))
}

/// Everything resolved from an asset root
#[derive(Debug, Clone)]
pub struct AssetCatalog {
    pub root: PathBuf,
    pub metrics: SpriteMetrics,
    pub sounds: Vec<(SoundAsset, PathBuf)>,
}

impl AssetCatalog {
    pub fn image_path(root: &Path, image: ImageAsset) -> PathBuf {
        root.join(image.file_name())
    }

    pub fn sound_path(root: &Path, sound: SoundAsset) -> PathBuf {
        root.join(sound.file_name())
    }

    /// Validate every asset under `root` and collect image sizes.
    ///
    /// Fails on the first missing or malformed file.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(root: &Path) -> Result<Self, AssetLoadError> {
        let mut metrics = SpriteMetrics::default();
        for image in ImageAsset::ALL {
            let path = Self::image_path(root, image);
            let header = read_prefix(&path, 24)?;
            let (w, h) = png_dimensions(&path, &header)?;
            log::debug!("{:?}: {}x{}", image, w, h);
            metrics.set(image, Vec2::new(w as f32, h as f32));
        }

        let mut sounds = Vec::with_capacity(SoundAsset::ALL.len());
        for sound in SoundAsset::ALL {
            let path = Self::sound_path(root, sound);
            let prefix = read_prefix(&path, 1)?;
            if prefix.is_empty() {
                return Err(AssetLoadError::Unreadable {
                    path,
                    reason: "empty file".to_string(),
                });
            }
            sounds.push((sound, path));
        }

        log::info!(
            "Loaded {} images and {} sounds from {}",
            ImageAsset::ALL.len(),
            sounds.len(),
            root.display()
        );
        Ok(Self {
            root: root.to_path_buf(),
            metrics,
            sounds,
        })
    }
}

/// Read up to `len` bytes from the start of a file
#[cfg(not(target_arch = "wasm32"))]
fn read_prefix(path: &Path, len: usize) -> Result<Vec<u8>, AssetLoadError> {
    use std::io::Read;

    let file = std::fs::File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AssetLoadError::Missing {
                path: path.to_path_buf(),
            }
        } else {
            AssetLoadError::Unreadable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        }
    })?;

    let mut buf = Vec::with_capacity(len);
    file.take(len as u64)
        .read_to_end(&mut buf)
        .map_err(|e| AssetLoadError::Unreadable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_header(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = PNG_SIGNATURE.to_vec();
        bytes.extend_from_slice(&13u32.to_be_bytes());
        bytes.extend_from_slice(b"IHDR");
        bytes.extend_from_slice(&width.to_be_bytes());
        bytes.extend_from_slice(&height.to_be_bytes());
        bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
        bytes
    }

    #[test]
    fn test_png_dimensions() {
        let header = png_header(288, 512);
        assert_eq!(png_dimensions(Path::new("bg.png"), &header), Ok((288, 512)));
    }

    #[test]
    fn test_png_rejects_garbage() {
        let path = Path::new("x.png");
        assert_eq!(
            png_dimensions(path, b"short").unwrap_err().code(),
            "invalid_image"
        );
        let mut header = png_header(10, 10);
        header[1] = b'J';
        assert!(png_dimensions(path, &header).is_err());
        assert!(png_dimensions(path, &png_header(0, 10)).is_err());
    }

    #[test]
    fn test_bird_frame_width() {
        let metrics = SpriteMetrics::default();
        assert_eq!(metrics.bird_frame_width(), 50.0);
        assert_eq!(metrics.bird_frame(), Vec2::new(50.0, 48.0));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_load_reads_sizes_and_reports_missing() {
        let root = std::env::temp_dir().join(format!("flappy_assets_{}", std::process::id()));
        std::fs::create_dir_all(&root).unwrap();
        for image in ImageAsset::ALL {
            std::fs::write(AssetCatalog::image_path(&root, image), png_header(40, 20)).unwrap();
        }

        // Sounds not written yet
        let err = AssetCatalog::load(&root).unwrap_err();
        assert_eq!(err.code(), "missing");
        assert!(err.path().ends_with("hit.wav"));

        for sound in SoundAsset::ALL {
            std::fs::write(AssetCatalog::sound_path(&root, sound), b"RIFF").unwrap();
        }
        let catalog = AssetCatalog::load(&root).expect("complete asset set should load");
        assert_eq!(catalog.metrics.pipe, Vec2::new(40.0, 20.0));
        assert_eq!(catalog.sounds.len(), 4);

        let _ = std::fs::remove_dir_all(&root);
    }
}
