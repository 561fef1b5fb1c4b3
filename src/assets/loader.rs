// ──────────────────────────────────────────────────────────────────────────
// assets/loader.rs
//
//  *   level.png        (RGBA pixels)   ──>  world::Level
//  *   texture *.png    (RGBA pixels)   ──>  world::TextureBank (ARGB)
// ──────────────────────────────────────────────────────────────────────────

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::world::{Level, LevelError, Texture, TextureBank, TextureError};

/*──────────────────────────── Error type ───────────────────────────*/

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("cannot decode `{}`: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("bad level `{}`: {source}", .path.display())]
    Level {
        path: PathBuf,
        #[source]
        source: LevelError,
    },

    #[error(transparent)]
    Texture(#[from] TextureError),
}

/*====================================================================*/
/*                       Public API                                   */
/*====================================================================*/

/// Join a settings-relative path onto the assets folder.
pub fn resolve(assets_dir: &Path, rel: &str) -> PathBuf {
    assets_dir.join(rel)
}

/// Decode the level image; one pixel becomes one cell.
pub fn load_level<P: AsRef<Path>>(path: P) -> Result<Level, AssetError> {
    let path = path.as_ref();
    let (w, h, rgba) = decode_rgba(path)?;
    let level = Level::from_rgba(w, h, &rgba).map_err(|source| AssetError::Level {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), width = w, height = h, "level loaded");
    Ok(level)
}

/// Decode every wall texture, in order, into a fresh bank.
///
/// Texture `i` serves material `i + 1`. Each is registered under its file
/// stem; all must be square and share one size.
pub fn load_textures<P: AsRef<Path>>(paths: &[P]) -> Result<TextureBank, AssetError> {
    let mut bank = TextureBank::default_with_checker();
    for path in paths {
        let path = path.as_ref();
        let (w, h, rgba) = decode_rgba(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let argb = rgba
            .chunks_exact(4)
            .map(|p| u32::from_be_bytes([p[3], p[0], p[1], p[2]]))
            .collect();
        let id = bank.insert(name.clone(), Texture::new(name, w, h, argb)?)?;
        tracing::info!(path = %path.display(), id, size = w, "texture loaded");
    }
    if bank.is_empty() {
        tracing::warn!("no wall textures loaded, walls use the checkerboard");
    }
    Ok(bank)
}

/*====================================================================*/
/*                       Helpers                                      */
/*====================================================================*/

fn decode_rgba(path: &Path) -> Result<(usize, usize, Vec<u8>), AssetError> {
    let img = image::open(path).map_err(|source| AssetError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();
    Ok((w as usize, h as usize, rgba.into_raw()))
}

/*====================================================================*/
/*                       Tests                                        */
/*====================================================================*/
