use anyhow::Result;
use chrono::NaiveDate;
use rand::Rng;
use rand::seq::SliceRandom;

use super::pool::ImagePool;
use super::store::{LastUsed, RotationStore};

/// Result of one selection run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Image to show today, if the pool has any
    pub chosen: Option<String>,
    /// Whether the store was rebuilt from a fresh shuffle
    pub regenerated: bool,
}

/// Whether an entry may be picked today. Entries used today stay eligible so
/// that a second run on the same day picks the same image again.
fn is_eligible(last_used: &LastUsed, today: NaiveDate) -> bool {
    match last_used {
        LastUsed::On(date) => *date == today,
        LastUsed::Unused | LastUsed::Invalid(_) => true,
    }
}

/// Pick today's wallpaper and record it in `store`.
///
/// The first eligible entry, in stored order, whose file is still a valid
/// image wins. When there is none the store is rebuilt from a shuffled
/// listing of the pool and its first image is used. Errors only come from
/// listing the pool.
pub fn select<P, R>(
    store: &mut RotationStore,
    today: NaiveDate,
    pool: &P,
    rng: &mut R,
) -> Result<Selection>
where
    P: ImagePool + ?Sized,
    R: Rng + ?Sized,
{
    let mut chosen = store
        .entries()
        .iter()
        .find(|e| is_eligible(&e.last_used, today) && pool.is_image(&e.filename))
        .map(|e| e.filename.clone());

    let regenerated = chosen.is_none();
    if regenerated {
        store.clear();

        let mut images = pool.list_images()?;
        images.shuffle(rng);
        for name in &images {
            store.set(name, LastUsed::Unused);
        }
        chosen = images.into_iter().next();
    }

    if let Some(name) = &chosen {
        store.set(name, LastUsed::On(today));
    }

    Ok(Selection {
        chosen,
        regenerated,
    })
}
