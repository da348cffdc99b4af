// Author: Dustin Pilgrim
// License: MIT
//
// One crop session: file selection → decode → drag → export → upload.
//
// Every selection bumps a token. Decode results carrying an older token are
// dropped, so picking a second file before the first finishes decoding can
// never leave the first image on screen.

use std::path::Path;
use std::sync::{Arc, Weak};

use cropit_core::{AspectRatio, CropEditor, CropError, CropRect, Handle, ImageHandle, Point, Result, Size};
use cropit_upload::Uploader;
use image::DynamicImage;

use crate::decode::{self, Decoded, Decoder, SelectionToken};
use crate::export::{self, ExportOptions, ExportedImage};
use crate::field::ImageField;

/// Things worth telling the caller about while waiting for a decode.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    StaleDecode {
        token: SelectionToken,
        current: Option<SelectionToken>,
    },
    Ready {
        token: SelectionToken,
        image: ImageHandle,
    },
}

pub struct CropSession {
    container: Size,
    aspect: AspectRatio,
    options: ExportOptions,

    last_token: SelectionToken,
    current: Option<SelectionToken>,

    source: Option<Arc<DynamicImage>>,
    editor: Option<CropEditor>,

    decoder: Decoder,
}

impl CropSession {
    pub fn new(container: Size, aspect: AspectRatio, options: ExportOptions) -> Self {
        Self {
            container,
            aspect,
            options,
            last_token: 0,
            current: None,
            source: None,
            editor: None,
            decoder: Decoder::new(),
        }
    }

    pub fn rect(&self) -> Option<CropRect> {
        self.editor.as_ref().map(CropEditor::rect)
    }

    pub fn is_ready(&self) -> bool {
        self.editor.is_some() && self.source.is_some()
    }

    /// A file was picked. Non-images are rejected without touching the
    /// current session; images replace it and start decoding in the background.
    pub fn select_file(&mut self, path: &Path) -> Result<SelectionToken> {
        decode::check_image_path(path)?;

        self.last_token += 1;
        let token = self.last_token;

        self.current = Some(token);
        self.source = None;
        self.editor = None;

        self.decoder.spawn(token, path.to_path_buf());
        Ok(token)
    }

    /// Feed one decode result in. Returns the loaded image if it belongs to the
    /// current selection, `None` if it was stale.
    pub fn on_decoded(&mut self, decoded: Decoded) -> Result<Option<ImageHandle>> {
        if self.current != Some(decoded.token) {
            return Ok(None);
        }

        let img = match decoded.result {
            Ok(img) => img,
            Err(e) => {
                // The selection is dead; a later result for it cannot arrive.
                self.current = None;
                return Err(e);
            }
        };

        let handle = match ImageHandle::fit(img.width(), img.height(), self.container) {
            Ok(h) => h,
            Err(e) => {
                self.current = None;
                return Err(e);
            }
        };

        self.editor = Some(CropEditor::new(handle, self.aspect));
        self.source = Some(Arc::new(img));
        Ok(Some(handle))
    }

    /// Block until the current selection is decoded, discarding stale results.
    pub fn wait_ready<F>(&mut self, mut emit: F) -> Result<ImageHandle>
    where
        F: FnMut(SessionEvent),
    {
        loop {
            let Some(token) = self.current else {
                return Err(CropError::ImageLoad("no file selected".into()));
            };

            if let Some(editor) = &self.editor {
                return Ok(*editor.image());
            }

            let decoded = self
                .decoder
                .recv()
                .ok_or_else(|| CropError::ImageLoad("decoder stopped".into()))?;
            let decoded_token = decoded.token;

            match self.on_decoded(decoded)? {
                Some(image) => {
                    emit(SessionEvent::Ready { token, image });
                    return Ok(image);
                }
                None => emit(SessionEvent::StaleDecode {
                    token: decoded_token,
                    current: self.current,
                }),
            }
        }
    }

    /// One complete drag: press on `handle`, move by `(dx, dy)`, release.
    /// Returns the resulting rectangle, `None` without a loaded image.
    pub fn drag(&mut self, handle: Handle, dx: f64, dy: f64) -> Option<CropRect> {
        let editor = self.editor.as_mut()?;
        let start = handle.point_on(&editor.rect());

        if !editor.begin_drag(handle, start) {
            return None;
        }
        editor.pointer_move(Point::new(start.x + dx, start.y + dy));
        editor.pointer_up();
        Some(editor.rect())
    }

    /// The window changed size. The rectangle is rescaled, not reset.
    /// Returns the scale factor applied (1.0 when nothing is loaded yet).
    pub fn resize_container(&mut self, container: Size) -> Result<f64> {
        if !container.is_usable() {
            return Err(CropError::EmptyContainer {
                width: container.w,
                height: container.h,
            });
        }
        self.container = container;
        match self.editor.as_mut() {
            Some(editor) => editor.resize_container(container),
            None => Ok(1.0),
        }
    }

    pub fn reset(&mut self) {
        if let Some(editor) = self.editor.as_mut() {
            editor.reset();
        }
    }

    fn source_ref(&self) -> Weak<DynamicImage> {
        self.source.as_ref().map(Arc::downgrade).unwrap_or_default()
    }

    pub fn export(&self) -> Result<ExportedImage> {
        let editor = self.editor.as_ref().ok_or(CropError::SourceUnavailable)?;
        export::export(&self.source_ref(), editor.image(), &editor.rect(), self.options)
    }

    /// Upload an already exported crop and hand the url to the field.
    /// On failure the session stays open so the same crop can be retried.
    pub fn submit<U, F>(
        &mut self,
        exported: &ExportedImage,
        uploader: &U,
        field: &mut ImageField<F>,
    ) -> Result<String>
    where
        U: Uploader + ?Sized,
        F: FnMut(&str),
    {
        let url = uploader
            .upload(&exported.to_upload())
            .map_err(|e| CropError::Upload(e.to_string()))?;

        field.set_image(&url);
        self.close();
        Ok(url)
    }

    /// Export + upload.
    pub fn confirm<U, F>(&mut self, uploader: &U, field: &mut ImageField<F>) -> Result<String>
    where
        U: Uploader + ?Sized,
        F: FnMut(&str),
    {
        let exported = self.export()?;
        self.submit(&exported, uploader, field)
    }

    /// Drop the crop session; the host field keeps its value.
    pub fn cancel(&mut self) {
        self.close();
    }

    /// Clear the host field's image and close any crop in progress.
    pub fn remove<F: FnMut(&str)>(&mut self, field: &mut ImageField<F>) {
        self.close();
        field.remove();
    }

    fn close(&mut self) {
        self.current = None;
        self.source = None;
        self.editor = None;
    }
}
