mod app;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lib_math::uvec2;
use lib_renderer::{
    DEFAULT_MAX_VERTEX_BYTES, MAX_TEXTURES, MaskColor, RendererConfig, VERTICES_PER_QUAD, Vertex,
};
use lib_str::StrError;
use log::info;

use crate::app::{Viewer, ViewerConfig};

#[derive(Parser, Debug)]
#[command(name = "quadbatch", about = "Draws textures through the batched quad renderer")]
struct Args {
    /// Initial window width in pixels.
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Initial window height in pixels.
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Color made transparent on load, as hex RRGGBBAA. Repeatable.
    #[arg(long = "mask", value_parser = parse_mask)]
    masks: Vec<MaskColor>,

    /// Camera zoom factor around the window centre.
    #[arg(long, default_value_t = 1.0)]
    zoom: f32,

    /// Byte capacity of the vertex batch. Must hold at least one quad.
    #[arg(long, default_value_t = DEFAULT_MAX_VERTEX_BYTES, value_parser = parse_vertex_bytes)]
    max_vertex_bytes: usize,

    /// Images to show. A generated checkerboard is shown when none are given.
    textures: Vec<PathBuf>,
}

fn parse_mask(src: &str) -> Result<MaskColor, StrError> {
    lib_str::hex_to_u32(src).map(MaskColor::from_rgba_u32)
}

fn parse_vertex_bytes(src: &str) -> Result<usize, String> {
    let bytes: usize = src.parse().map_err(|err| format!("{err}"))?;
    let min_bytes = VERTICES_PER_QUAD * size_of::<Vertex>();

    if bytes < min_bytes {
        return Err(format!("{bytes} bytes cannot hold one quad ({min_bytes} bytes)"));
    }

    Ok(bytes)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args = Args::parse();
    info!("quadbatch starting with {} texture(s)", args.textures.len());

    let config = ViewerConfig {
        renderer: RendererConfig {
            window_size: uvec2(args.width, args.height),
            max_vertex_bytes: args.max_vertex_bytes,
            max_textures: MAX_TEXTURES,
        },
        textures: args.textures,
        masks: args.masks,
        zoom: args.zoom,
    };

    lib_app::run_app::<Viewer>(config).context("viewer exited with an error")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_parse_as_rgba_hex() {
        let args = Args::parse_from([
            "quadbatch",
            "--mask",
            "FF00FFFF",
            "--mask",
            "0x00000000",
            "a.png",
        ]);

        assert_eq!(
            args.masks,
            vec![MaskColor([255, 0, 255, 255]), MaskColor([0, 0, 0, 0])]
        );
        assert_eq!(args.textures, vec![PathBuf::from("a.png")]);
        assert_eq!(args.width, 800);
    }

    #[test]
    fn vertex_capacity_must_fit_a_quad() {
        assert!(Args::try_parse_from(["quadbatch", "--max-vertex-bytes", "0"]).is_err());
        assert!(Args::try_parse_from(["quadbatch", "--max-vertex-bytes", "119"]).is_err());

        let args = Args::parse_from(["quadbatch", "--max-vertex-bytes", "120"]);
        assert_eq!(args.max_vertex_bytes, 120);
        assert_eq!(
            Args::parse_from(["quadbatch"]).max_vertex_bytes,
            DEFAULT_MAX_VERTEX_BYTES
        );
    }

    #[test]
    fn bad_mask_is_rejected() {
        assert!(Args::try_parse_from(["quadbatch", "--mask", "GG"]).is_err());
    }
}
