//! Composition of stored items into one collage image.
//!
//! [`compose`] is the whole pipeline: sort chronologically, pick a grid,
//! decode every item's stored payload into a cell thumbnail (in parallel,
//! tolerating individual failures), paint header and cells, encode PNG.
//!
//! A cell whose payload no longer decodes is left as blank background and
//! logged — one damaged record never takes down the export. Only the final
//! PNG encode can fail the operation.

use super::layout::{THUMB, grid_for};
use super::text::{draw_text, fill_rect, stroke_rect, text_width};
use crate::config::{CollageColors, Color, JournalConfig};
use crate::imaging::fit_to_square;
use crate::item::{Item, ValidationError};
use chrono::NaiveDate;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, imageops};
use log::{info, warn};
use rayon::prelude::*;
use std::io::Cursor;
use thiserror::Error;

/// Glyph scale of the header title line.
const TITLE_SCALE: u32 = 2;
/// Glyph scale of the date-range subtitle.
const SUBTITLE_SCALE: u32 = 1;
/// Top of the title line inside the header band.
const TITLE_Y: i32 = 24;
/// Top of the subtitle line inside the header band.
const SUBTITLE_Y: i32 = 48;

#[derive(Error, Debug)]
pub enum CollageError {
    /// The input violated a composition precondition; nothing was rendered.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The finished canvas could not be serialized as PNG.
    #[error("failed to encode collage: {0}")]
    Encode(#[source] image::ImageError),
}

/// Presentation inputs for one composition run.
#[derive(Debug, Clone)]
pub struct ComposeOptions {
    /// Header title text.
    pub title: String,
    /// Palette for canvas, cells and header text.
    pub colors: CollageColors,
}

impl ComposeOptions {
    pub fn from_config(config: &JournalConfig) -> Self {
        Self {
            title: config.collage.title.clone(),
            colors: config.collage.colors.clone(),
        }
    }
}

/// A finished composite image.
#[derive(Debug, Clone)]
pub struct Collage {
    /// PNG-encoded canvas.
    pub png: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Cells left blank because their stored payload no longer decodes.
    pub failed_cells: usize,
}

/// Render `items` as one collage.
///
/// Items are laid out oldest-first, row-major (date ties broken by id, so the
/// layout is deterministic). Composing an empty slice is rejected with
/// [`ValidationError::NoItems`] before any pixel work.
pub fn compose(items: &[Item], options: &ComposeOptions) -> Result<Collage, CollageError> {
    if items.is_empty() {
        return Err(ValidationError::NoItems.into());
    }

    let mut order: Vec<&Item> = items.iter().collect();
    order.sort_by_key(|item| (item.date, item.id));

    let grid = grid_for(order.len());
    let (width, height) = (grid.canvas_width(), grid.canvas_height());

    // Decode all cells before painting any; the join keeps every outcome
    // instead of short-circuiting on the first bad payload.
    let thumbs: Vec<Option<RgbImage>> = order
        .par_iter()
        .map(|item| match fit_to_square(&item.image, THUMB) {
            Ok(thumb) => Some(thumb),
            Err(err) => {
                warn!(
                    "event=collage_cell_decode module=collage status=error id={} error={}",
                    item.id, err
                );
                None
            }
        })
        .collect();
    let failed_cells = thumbs.iter().filter(|thumb| thumb.is_none()).count();

    let mut canvas = RgbImage::from_pixel(width, height, rgb(&options.colors.background));
    draw_header(
        &mut canvas,
        options,
        order[0].date,
        order[order.len() - 1].date,
    );

    for (index, thumb) in thumbs.iter().enumerate() {
        let (x, y) = grid.cell_origin(index);
        fill_rect(
            &mut canvas,
            x,
            y,
            THUMB,
            THUMB,
            rgb(&options.colors.cell_background),
        );
        if let Some(thumb) = thumb {
            imageops::replace(&mut canvas, thumb, i64::from(x), i64::from(y));
        }
        stroke_rect(&mut canvas, x, y, THUMB, THUMB, rgb(&options.colors.border), 1);
    }

    let mut png = Vec::new();
    DynamicImage::ImageRgb8(canvas)
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(CollageError::Encode)?;

    info!(
        "event=collage_compose module=collage status=ok items={} grid={}x{} width={} height={} failed_cells={}",
        order.len(),
        grid.rows,
        grid.cols,
        width,
        height,
        failed_cells
    );

    Ok(Collage {
        png,
        width,
        height,
        failed_cells,
    })
}

fn draw_header(
    canvas: &mut RgbImage,
    options: &ComposeOptions,
    earliest: NaiveDate,
    latest: NaiveDate,
) {
    let width = canvas.width() as i32;

    let title_x = (width - text_width(&options.title, TITLE_SCALE) as i32) / 2;
    draw_text(
        canvas,
        title_x,
        TITLE_Y,
        &options.title,
        rgb(&options.colors.title_text),
        TITLE_SCALE,
    );

    let subtitle = format!(
        "{} ~ {}",
        earliest.format("%Y.%m.%d"),
        latest.format("%Y.%m.%d")
    );
    let subtitle_x = (width - text_width(&subtitle, SUBTITLE_SCALE) as i32) / 2;
    draw_text(
        canvas,
        subtitle_x,
        SUBTITLE_Y,
        &subtitle,
        rgb(&options.colors.subtitle_text),
        SUBTITLE_SCALE,
    );
}

fn rgb(color: &Color) -> Rgb<u8> {
    Rgb(color.0)
}
