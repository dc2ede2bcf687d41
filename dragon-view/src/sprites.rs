//! Sprite loading for the viewer.
//!
//! Decoding happens on a background thread so the first frames render
//! immediately; sprites show up once their texture has been uploaded.
//! A sprite that fails to load stays missing and is simply never drawn.

use anyhow::Context;
use dragon_core::{config::SpriteConfig, surface::Sprite};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};

/// RGBA pixels decoded from disk.
struct DecodedSprite {
    size: [usize; 2],
    rgba: Vec<u8>,
}

type LoadResult = (Sprite, anyhow::Result<DecodedSprite>);

pub struct SpriteLoader {
    rx: Option<Receiver<LoadResult>>,
    textures: HashMap<Sprite, egui::TextureHandle>,
    pending: usize,
    failed: usize,
}

impl SpriteLoader {
    /// Starts decoding every sprite in `cfg` in the background.
    ///
    /// `ctx` is woken up after each sprite finishes so the texture can be
    /// uploaded on the next frame.
    pub fn spawn(ctx: &egui::Context, cfg: &SpriteConfig) -> Self {
        let jobs: Vec<(Sprite, PathBuf)> = Sprite::ALL.iter().map(|&s| (s, cfg.path(s))).collect();
        let (tx, rx) = mpsc::channel();
        let ctx = ctx.clone();
        let pending = jobs.len();

        let spawned = std::thread::Builder::new()
            .name("sprite-loader".into())
            .spawn(move || {
                for (sprite, path) in jobs {
                    let result = decode(&path);
                    if tx.send((sprite, result)).is_err() {
                        return;
                    }
                    ctx.request_repaint();
                }
            });

        match spawned {
            Ok(_) => Self {
                rx: Some(rx),
                textures: HashMap::new(),
                pending,
                failed: 0,
            },
            Err(e) => {
                tracing::warn!("could not start sprite loader: {e}");
                Self {
                    rx: None,
                    textures: HashMap::new(),
                    pending: 0,
                    failed: pending,
                }
            }
        }
    }

    /// Uploads any sprites decoded since the last call.
    pub fn poll(&mut self, ctx: &egui::Context) {
        let Some(rx) = &self.rx else {
            return;
        };

        loop {
            match rx.try_recv() {
                Ok((sprite, Ok(decoded))) => {
                    let image = egui::ColorImage::from_rgba_unmultiplied(decoded.size, &decoded.rgba);
                    let handle = ctx.load_texture(sprite.name(), image, egui::TextureOptions::LINEAR);
                    tracing::debug!(sprite = sprite.name(), size = ?decoded.size, "sprite ready");
                    self.textures.insert(sprite, handle);
                    self.pending = self.pending.saturating_sub(1);
                }
                Ok((sprite, Err(e))) => {
                    tracing::warn!(sprite = sprite.name(), "sprite unavailable: {e:#}");
                    self.failed += 1;
                    self.pending = self.pending.saturating_sub(1);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.rx = None;
                    break;
                }
            }
        }
    }

    pub fn texture(&self, sprite: Sprite) -> Option<egui::TextureId> {
        self.textures.get(&sprite).map(egui::TextureHandle::id)
    }

    pub fn is_loading(&self) -> bool {
        self.pending > 0
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Number of sprites with an uploaded texture.
    pub fn loaded(&self) -> usize {
        self.textures.len()
    }
}

fn decode(path: &Path) -> anyhow::Result<DecodedSprite> {
    let img = image::open(path)
        .with_context(|| format!("failed to decode {}", path.display()))?
        .to_rgba8();
    let (w, h) = img.dimensions();
    Ok(DecodedSprite {
        size: [w as usize, h as usize],
        rgba: img.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_reports_missing_file_path() {
        let err = decode(Path::new("no/such/sprite.png")).err().unwrap();
        assert!(format!("{err:#}").contains("no/such/sprite.png"));
    }

    #[test]
    fn decode_reads_rgba_pixels() {
        let path = std::env::temp_dir().join(format!("dragon-sprite-{}.png", std::process::id()));
        image::RgbaImage::from_pixel(3, 2, image::Rgba([255, 0, 0, 255]))
            .save(&path)
            .unwrap();

        let decoded = decode(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(decoded.size, [3, 2]);
        assert_eq!(decoded.rgba.len(), 3 * 2 * 4);
        assert_eq!(&decoded.rgba[..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn missing_sprites_finish_as_failures() {
        let ctx = egui::Context::default();
        let cfg = SpriteConfig {
            asset_dir: PathBuf::from("does-not-exist"),
            ..SpriteConfig::default()
        };
        let mut loader = SpriteLoader::spawn(&ctx, &cfg);

        for _ in 0..200 {
            loader.poll(&ctx);
            if !loader.is_loading() {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(10));
        }

        assert!(!loader.is_loading());
        assert_eq!(loader.failed(), 3);
        assert!(loader.texture(Sprite::Head).is_none());
    }
}
