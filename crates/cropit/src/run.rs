// Author: Dustin Pilgrim
// License: MIT

use std::path::{Path, PathBuf};

use cropit_core::{AspectRatio, CropEditor, ImageHandle, Size};
use cropit_upload::{UploadClient, Uploader};
use eventline::{debug, info, warn};

use crate::cli::{Args, Cmd, Step};
use crate::config::{CropitConfig, DEFAULT_CONTAINER};
use crate::decode;
use crate::export::{ExportOptions, ExportedImage};
use crate::field::ImageField;
use crate::paths;
use crate::print;
use crate::session::{CropSession, SessionEvent};

pub fn run(args: Args, cfg: CropitConfig) -> Result<(), String> {
    debug!("parsed args: {:?}", args.cmd);

    match args.cmd {
        Cmd::Inspect {
            image,
            container,
            aspect,
            json,
        } => run_inspect(
            &image,
            container.unwrap_or(cfg.container),
            aspect.unwrap_or(cfg.aspect),
            json,
        ),

        Cmd::Crop {
            image,
            container,
            aspect,
            circle,
            steps,
            cancel,
            out,
            upload,
            endpoint,
            token,
            current_image,
        } => {
            let req = CropRequest {
                container: container.unwrap_or(cfg.container),
                aspect: aspect.unwrap_or(cfg.aspect),
                circle,
                steps,
                cancel,
                out,
                upload,
                endpoint,
                token,
                current_image,
            };
            run_crop(&image, req, &cfg)
        }

        Cmd::Remove { current_image } => run_remove(current_image),
    }
}

fn run_inspect(image: &Path, container: Size, aspect: AspectRatio, json: bool) -> Result<(), String> {
    decode::check_image_path(image).map_err(|e| e.to_string())?;
    let img = decode::decode_file(image).map_err(|e| e.to_string())?;

    let handle = ImageHandle::fit(img.width(), img.height(), container).map_err(|e| e.to_string())?;
    let editor = CropEditor::new(handle, aspect);
    info!(
        "inspect {}: {}x{} scale={:.4}",
        image.display(),
        handle.natural_w,
        handle.natural_h,
        handle.scale
    );

    if json {
        return print::print_layout_json(&print::Layout {
            image: handle,
            display: handle.display_size(),
            aspect,
            crop: editor.rect(),
        });
    }

    print::print_layout(&handle, &editor.rect());
    Ok(())
}

struct CropRequest {
    container: Size,
    aspect: AspectRatio,
    circle: bool,
    steps: Vec<Step>,
    cancel: bool,
    out: Option<PathBuf>,
    upload: bool,
    endpoint: Option<String>,
    token: Option<String>,
    current_image: String,
}

fn run_crop(image: &Path, req: CropRequest, cfg: &CropitConfig) -> Result<(), String> {
    let options = ExportOptions {
        circle: req.circle,
        jpeg_quality: cfg.jpeg_quality,
    };
    let mut session = CropSession::new(req.container, req.aspect, options);

    let token = session.select_file(image).map_err(|e| e.to_string())?;
    info!("selected {} (token {token})", image.display());

    let handle = session
        .wait_ready(|ev| match ev {
            SessionEvent::StaleDecode { token, current } => {
                debug!("discarding stale decode: token {token}, current {current:?}");
            }
            SessionEvent::Ready { token, image } => {
                info!(
                    "decoded token {token}: {}x{} scale={:.4}",
                    image.natural_w, image.natural_h, image.scale
                );
            }
        })
        .map_err(|e| e.to_string())?;

    if let Some(rect) = session.rect() {
        print::print_layout(&handle, &rect);
    }

    for step in &req.steps {
        apply_step(&mut session, step)?;
    }

    if req.cancel {
        session.cancel();
        info!("crop cancelled, image field left as is");
        println!("cancelled");
        return Ok(());
    }

    if !req.upload {
        let exported = export_crop(&session)?;
        let path = req
            .out
            .unwrap_or_else(|| paths::default_output_path(cfg, exported.extension()));
        save_crop(&exported, &path)?;
        return Ok(());
    }

    let endpoint = req
        .endpoint
        .or_else(|| cfg.upload_endpoint.clone())
        .ok_or("no upload endpoint (set cropit.upload_endpoint or pass --endpoint)")?;
    let token = req
        .token
        .or_else(|| cfg.effective_token())
        .ok_or("no upload token (set $CROPIT_TOKEN, cropit.upload_token or pass --token)")?;

    let client = UploadClient::new(endpoint, token).map_err(|e| e.to_string())?;
    info!("uploading to {}", client.endpoint());

    let mut field = ImageField::new(req.current_image, |url: &str| {
        info!("image field updated: {url}");
    });
    if field.has_image() {
        debug!("replacing current image {}", field.current_image());
    }

    // --out keeps a copy even when the upload works.
    let saved = match &req.out {
        Some(path) => {
            let exported = export_crop(&session)?;
            save_crop(&exported, path)?;
            Some(exported)
        }
        None => None,
    };

    let url = upload_crop(&mut session, &client, &mut field, saved.as_ref(), |exported| {
        paths::default_output_path(cfg, exported.extension())
    })?;
    println!("url: {url}");

    Ok(())
}

fn export_crop(session: &CropSession) -> Result<ExportedImage, String> {
    let exported = session.export().map_err(|e| e.to_string())?;
    info!(
        "exported {}x{} {} ({} bytes)",
        exported.width,
        exported.height,
        exported.mime(),
        exported.bytes.len()
    );
    Ok(exported)
}

fn save_crop(exported: &ExportedImage, path: &Path) -> Result<(), String> {
    exported
        .write_to(path)
        .map_err(|e| format!("write {}: {e}", path.display()))?;
    info!("saved crop to {}", path.display());
    println!("saved to: {}", path.display());
    Ok(())
}

/// Upload the crop and hand the url to `field`.
///
/// `saved` is the copy already written with `--out`; it is sent as is.
/// Without one, a failed upload writes the crop to `fallback` so it can be
/// retried without cropping again.
fn upload_crop<U, F, P>(
    session: &mut CropSession,
    uploader: &U,
    field: &mut ImageField<F>,
    saved: Option<&ExportedImage>,
    fallback: P,
) -> Result<String, String>
where
    U: Uploader + ?Sized,
    F: FnMut(&str),
    P: FnOnce(&ExportedImage) -> PathBuf,
{
    let result = match saved {
        Some(exported) => session.submit(exported, uploader, field),
        None => session.confirm(uploader, field),
    };

    let err = match result {
        Ok(url) => return Ok(url),
        Err(e) => e,
    };
    warn!("upload failed, crop kept for retry: {err}");

    if saved.is_some() {
        return Err(err.to_string());
    }

    let exported = export_crop(session)?;
    let path = fallback(&exported);
    save_crop(&exported, &path)?;
    Err(format!("{err} (crop kept at {})", path.display()))
}

fn run_remove(current_image: String) -> Result<(), String> {
    let mut session = CropSession::new(DEFAULT_CONTAINER, AspectRatio::Free, ExportOptions::default());
    let mut field = ImageField::new(current_image, |url: &str| {
        debug!("on_image_cropped({url:?})");
    });

    if !field.has_image() {
        info!("image field already empty");
    }
    session.remove(&mut field);

    info!("image removed");
    println!("current image: \"{}\"", field.current_image());
    Ok(())
}


fn apply_step(session: &mut CropSession, step: &Step) -> Result<(), String> {
    if !session.is_ready() {
        return Err("no image loaded".into());
    }

    match *step {
        Step::Drag { handle, dx, dy } => {
            if let Some(rect) = session.drag(handle, dx, dy) {
                debug!(
                    "drag {handle} by ({dx}, {dy}) -> x={:.1} y={:.1} w={:.1} h={:.1}",
                    rect.x, rect.y, rect.w, rect.h
                );
            }
        }
        Step::Container(size) => {
            let factor = session.resize_container(size).map_err(|e| e.to_string())?;
            debug!("container {}x{}: rescaled by {factor:.4}", size.w, size.h);
        }
        Step::Reset => {
            session.reset();
            debug!("crop reset");
        }
    }
    Ok(())
}
