//! Sprite-sheet animations: immutable frame sequences and running instances of them.
//!
//! Drawing is up to the application; [`Animations::current_frame()`] says which cell of
//! which sheet to draw.

use arrayvec::ArrayVec;

use crate::arena::{OutOfRange, Slot, SlotStore, slot_id};

/// Maximum number of frames in an [`AnimationDefinition`].
pub const MAX_FRAMES: usize = 16;

slot_id! {
    /// Identifies a sprite sheet owned by the application's renderer.
    ///
    /// This crate never interprets it; it is passed through to [`FrameView`].
    pub struct SheetId;
}

slot_id! {
    /// Identifies an [`AnimationDefinition`] within [`Animations`].
    pub struct AnimationDefinitionId;
}

slot_id! {
    /// Identifies a running [`Animation`] within [`Animations`].
    pub struct AnimationId;
}

/// One cell of a sprite sheet, shown for some time.
#[derive(Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub struct AnimationFrame {
    /// How long this frame is shown, in seconds.
    pub duration: f64,
    /// Row of the sprite sheet.
    pub row: u8,
    /// Column of the sprite sheet.
    pub column: u8,
}

/// An immutable sequence of frames from one sprite sheet.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationDefinition {
    sheet: SheetId,
    frames: ArrayVec<AnimationFrame, MAX_FRAMES>,
}

impl AnimationDefinition {
    /// The sprite sheet the frames are taken from.
    pub fn sheet(&self) -> SheetId {
        self.sheet
    }

    /// The frames, of which there are between 1 and [`MAX_FRAMES`].
    pub fn frames(&self) -> &[AnimationFrame] {
        &self.frames
    }
}

/// A running instance of an [`AnimationDefinition`].
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct Animation {
    definition: AnimationDefinitionId,
    frame_index: usize,
    frame_time: f64,
    /// Whether to start over after the last frame, rather than staying on it.
    pub looping: bool,
    /// Whether the renderer should mirror the sprite horizontally.
    pub flipped: bool,
    active: bool,
}

impl Animation {
    /// The definition this is an instance of.
    pub fn definition(&self) -> AnimationDefinitionId {
        self.definition
    }

    /// Index of the frame currently shown.
    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    /// Time remaining until the next frame, in seconds.
    pub fn frame_time(&self) -> f64 {
        self.frame_time
    }
}

impl Slot for Animation {
    fn is_active(&self) -> bool {
        self.active
    }

    fn deactivate(&mut self) {
        self.active = false;
    }
}

/// What the renderer should draw for an [`Animation`] right now.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[non_exhaustive]
pub struct FrameView {
    #[allow(missing_docs)]
    pub sheet: SheetId,
    #[allow(missing_docs)]
    pub row: u8,
    #[allow(missing_docs)]
    pub column: u8,
    /// Whether to mirror the sprite horizontally.
    pub flipped: bool,
}

/// Pools of [`AnimationDefinition`]s and their running [`Animation`]s.
#[derive(Clone, Debug)]
pub struct Animations {
    definitions: SlotStore<AnimationDefinition>,
    instances: SlotStore<Animation>,
}

impl Animations {
    /// Constructs empty pools.
    pub const fn new() -> Self {
        Self {
            definitions: SlotStore::new("animation definition"),
            instances: SlotStore::new("animation"),
        }
    }

    /// Defines an animation which shows the given `columns` of `row` of `sheet` in
    /// order, each for `duration` seconds.
    ///
    /// Panics if there are no columns or more than [`MAX_FRAMES`], or if `duration` is
    /// negative or not finite.
    #[track_caller]
    pub fn create_definition(
        &mut self,
        sheet: SheetId,
        duration: f64,
        row: u8,
        columns: &[u8],
    ) -> AnimationDefinitionId {
        assert!(
            (1..=MAX_FRAMES).contains(&columns.len()),
            "animation must have between 1 and {MAX_FRAMES} frames, not {}",
            columns.len()
        );
        assert!(
            duration.is_finite() && duration >= 0.0,
            "animation frame duration {duration} is invalid"
        );
        let frames = columns
            .iter()
            .map(|&column| AnimationFrame {
                duration,
                row,
                column,
            })
            .collect();
        AnimationDefinitionId::new(self.definitions.append(AnimationDefinition { sheet, frames }))
    }

    /// Returns the definition with the given id.
    ///
    /// Panics if the id is out of range.
    #[track_caller]
    pub fn definition(&self, id: AnimationDefinitionId) -> &AnimationDefinition {
        &self.definitions[id.index()]
    }

    /// Starts a new animation instance on its first frame, reusing the slot of a
    /// destroyed instance if there is one.
    ///
    /// Panics if `definition` does not exist.
    #[track_caller]
    pub fn create(&mut self, definition: AnimationDefinitionId, looping: bool) -> AnimationId {
        let frame_time = self.definition(definition).frames[0].duration;
        AnimationId::new(self.instances.create(Animation {
            definition,
            frame_index: 0,
            frame_time,
            looping,
            flipped: false,
            active: true,
        }))
    }

    /// Stops an animation instance and makes its slot available for reuse.
    pub fn destroy(&mut self, id: AnimationId) -> Result<(), OutOfRange> {
        self.instances.deactivate(id.index())
    }

    /// Returns the animation instance with the given id, active or not.
    ///
    /// Panics if the id is out of range.
    #[track_caller]
    pub fn get(&self, id: AnimationId) -> &Animation {
        &self.instances[id.index()]
    }

    /// Returns the animation instance with the given id for modification.
    ///
    /// Panics if the id is out of range.
    #[track_caller]
    pub fn get_mut(&mut self, id: AnimationId) -> &mut Animation {
        &mut self.instances[id.index()]
    }

    /// Returns the animation instance with the given id, or an error if it is out of
    /// range.
    pub fn try_get(&self, id: AnimationId) -> Result<&Animation, OutOfRange> {
        self.instances.get(id.index())
    }

    /// Number of animation instance slots, active or not.
    pub fn count(&self) -> usize {
        self.instances.len()
    }

    /// Advances every active instance by `dt` seconds.
    ///
    /// An instance moves at most one frame per call. After its last frame, a looping
    /// instance returns to the first and a non-looping one stays on the last.
    pub fn update(&mut self, dt: f64) {
        let definitions = &self.definitions;
        for (_, animation) in self.instances.iter_mut() {
            if !animation.active {
                continue;
            }
            let frames = &definitions[animation.definition.index()].frames;

            animation.frame_time -= dt;
            if animation.frame_time <= 0.0 {
                animation.frame_index += 1;
                if animation.frame_index >= frames.len() {
                    animation.frame_index = if animation.looping {
                        0
                    } else {
                        frames.len() - 1
                    };
                }
                animation.frame_time = frames[animation.frame_index].duration;
            }
        }
    }

    /// Returns what to draw for the instance `id`.
    ///
    /// Panics if the id is out of range.
    #[track_caller]
    pub fn current_frame(&self, id: AnimationId) -> FrameView {
        let animation = self.get(id);
        let definition = self.definition(animation.definition);
        let frame = definition.frames[animation.frame_index];
        FrameView {
            sheet: definition.sheet,
            row: frame.row,
            column: frame.column,
            flipped: animation.flipped,
        }
    }

    /// Removes all animation instances. Every previously returned [`AnimationId`]
    /// becomes invalid.
    ///
    /// Definitions are kept, since they describe assets rather than level state.
    pub fn reset(&mut self) {
        self.instances.reset();
    }
}

impl Default for Animations {
    fn default() -> Self {
        Self::new()
    }
}
