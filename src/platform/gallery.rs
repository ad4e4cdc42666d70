use std::io::Write;
use std::path::PathBuf;

use tracing::debug;

use super::input::LineSource;
use crate::capability::{GalleryPicker, ImageRef, PickOutcome};
use crate::media::collect_images;

/// Photo picker over the images in a directory.
///
/// Lists the photos, then reads a selection: a list number or a path.
/// A blank line or end of input cancels.
pub struct DirectoryGallery<L, W> {
    root: Option<PathBuf>,
    input: L,
    out: W,
}

impl<L: LineSource, W: Write> DirectoryGallery<L, W> {
    /// Picker over `root`, prompting on `out` and reading from `input`
    pub fn new(root: Option<PathBuf>, input: L, out: W) -> Self {
        Self { root, input, out }
    }

    /// Consume and return the prompt writer
    pub fn into_inner(self) -> W {
        self.out
    }

    fn prompt(&mut self, photos: &[PathBuf]) -> std::io::Result<()> {
        if photos.is_empty() {
            writeln!(self.out, "No photos in gallery.")?;
        } else {
            writeln!(self.out, "Gallery:")?;
            for (i, photo) in photos.iter().enumerate() {
                writeln!(self.out, "  {:>3}. {}", i + 1, photo.display())?;
            }
        }
        write!(self.out, "Pick a photo (number or path, blank to cancel): ")?;
        self.out.flush()
    }
}

impl<L: LineSource, W: Write> GalleryPicker for DirectoryGallery<L, W> {
    fn pick(&mut self) -> PickOutcome {
        let photos = match &self.root {
            Some(root) if root.is_dir() => collect_images(root),
            Some(root) => {
                return PickOutcome::Failed(format!(
                    "gallery directory {} not found",
                    root.display()
                ));
            }
            None => Vec::new(),
        };

        if let Err(err) = self.prompt(&photos) {
            return PickOutcome::Failed(err.to_string());
        }

        let line = match self.input.next_line() {
            Ok(Some(line)) => line,
            Ok(None) => return PickOutcome::Cancelled,
            Err(err) => return PickOutcome::Failed(err.to_string()),
        };
        let choice = line.trim();
        if choice.is_empty() {
            return PickOutcome::Cancelled;
        }

        if let Ok(index) = choice.parse::<usize>() {
            return match index.checked_sub(1).and_then(|i| photos.get(i)) {
                Some(photo) => PickOutcome::Picked(ImageRef::new(photo.clone())),
                None => PickOutcome::Failed(format!("no photo numbered {index}")),
            };
        }

        let path = PathBuf::from(choice);
        if path.is_file() {
            debug!(path = %path.display(), "picked by path");
            PickOutcome::Picked(ImageRef::new(path))
        } else {
            PickOutcome::Failed(format!("no such photo: {}", path.display()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::input::ReaderLines;
    use std::fs;
    use std::io::Cursor;

    fn gallery_with(
        root: Option<PathBuf>,
        input: &str,
    ) -> DirectoryGallery<ReaderLines<Cursor<Vec<u8>>>, Vec<u8>> {
        DirectoryGallery::new(
            root,
            ReaderLines::new(Cursor::new(input.as_bytes().to_vec())),
            Vec::new(),
        )
    }

    #[test]
    fn test_pick_by_number() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.png"), b"").unwrap();
        fs::write(dir.path().join("b.png"), b"").unwrap();

        let mut gallery = gallery_with(Some(dir.path().to_path_buf()), "2\n");
        assert_eq!(
            gallery.pick(),
            PickOutcome::Picked(ImageRef::new(dir.path().join("b.png")))
        );
        let prompt = String::from_utf8(gallery.into_inner()).unwrap();
        assert!(prompt.contains("  1. "));
        assert!(prompt.contains("  2. "));
    }

    #[test]
    fn test_blank_or_eof_cancels() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            gallery_with(Some(dir.path().to_path_buf()), "\n").pick(),
            PickOutcome::Cancelled
        );
        assert_eq!(
            gallery_with(Some(dir.path().to_path_buf()), "").pick(),
            PickOutcome::Cancelled
        );
    }

    #[test]
    fn test_out_of_range_number_fails() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = gallery_with(Some(dir.path().to_path_buf()), "3\n").pick();
        assert!(matches!(outcome, PickOutcome::Failed(_)));
    }

    #[test]
    fn test_pick_by_path_without_gallery_dir() {
        let dir = tempfile::tempdir().unwrap();
        let photo = dir.path().join("qr.png");
        fs::write(&photo, b"").unwrap();

        let mut gallery = gallery_with(None, &format!("{}\n", photo.display()));
        assert_eq!(gallery.pick(), PickOutcome::Picked(ImageRef::new(photo)));
    }

    #[test]
    fn test_missing_gallery_dir_fails() {
        let outcome = gallery_with(Some(PathBuf::from("/no/such/gallery")), "1\n").pick();
        assert!(matches!(outcome, PickOutcome::Failed(_)));
    }
}
