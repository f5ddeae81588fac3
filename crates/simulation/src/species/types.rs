use serde::Deserialize;

// =============================================================================
// Channels
// =============================================================================

/// One of the five animated weights of a plant.
///
/// `Root` scales the whole instance uniformly; `X`..`W` are per-segment blend
/// weights consumed by the skinning/instance shader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Root,
    X,
    Y,
    Z,
    W,
}

impl Channel {
    pub const ALL: [Channel; 5] = [Channel::Root, Channel::X, Channel::Y, Channel::Z, Channel::W];

    /// Slot in `PlantInstance::segment_scales`, `None` for the root channel.
    pub fn segment_index(self) -> Option<usize> {
        match self {
            Channel::Root => None,
            Channel::X => Some(0),
            Channel::Y => Some(1),
            Channel::Z => Some(2),
            Channel::W => Some(3),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Channel::Root => "root",
            Channel::X => "x",
            Channel::Y => "y",
            Channel::Z => "z",
            Channel::W => "w",
        }
    }
}

/// One value per channel.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChannelTable<T> {
    pub root: T,
    pub x: T,
    pub y: T,
    pub z: T,
    pub w: T,
}

impl<T> ChannelTable<T> {
    pub fn get(&self, channel: Channel) -> &T {
        match channel {
            Channel::Root => &self.root,
            Channel::X => &self.x,
            Channel::Y => &self.y,
            Channel::Z => &self.z,
            Channel::W => &self.w,
        }
    }

    pub fn get_mut(&mut self, channel: Channel) -> &mut T {
        match channel {
            Channel::Root => &mut self.root,
            Channel::X => &mut self.x,
            Channel::Y => &mut self.y,
            Channel::Z => &mut self.z,
            Channel::W => &mut self.w,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Channel, &T)> {
        Channel::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Channel, &mut T)> {
        let ChannelTable { root, x, y, z, w } = self;
        [
            (Channel::Root, root),
            (Channel::X, x),
            (Channel::Y, y),
            (Channel::Z, z),
            (Channel::W, w),
        ]
        .into_iter()
    }

    /// Build a table by evaluating `f` once per channel, in `Channel::ALL` order.
    pub fn from_fn(mut f: impl FnMut(Channel) -> T) -> Self {
        Self {
            root: f(Channel::Root),
            x: f(Channel::X),
            y: f(Channel::Y),
            z: f(Channel::Z),
            w: f(Channel::W),
        }
    }
}

// =============================================================================
// Profiles
// =============================================================================

/// Spring parameters of one channel of a growth or shrink animation.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ChannelParams {
    /// Fraction of the animation duration the channel waits before moving.
    pub delayed_start_fraction: f32,
    pub pd_damping: f32,
    pub pd_frequency: f32,
    /// Random spread of the growth target around 1.0. Unused when shrinking.
    #[serde(default)]
    pub margin: f32,
}

/// Per-species growth and shrink parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpeciesProfile {
    pub baseline_scale: f32,
    pub growth_duration: f32,
    pub shrink_duration: f32,
    /// Tail of every animation during which spring parameters blend toward
    /// the converging values.
    pub convergence_duration: f32,
    pub convergence_frequency: f32,
    pub convergence_damping: f32,
    /// Random spread of the planted height around `baseline_scale`.
    pub height_margin: f32,
    /// Yaw range in radians, `(min, max)`.
    pub rotation_range: (f32, f32),
    pub growth_channels: ChannelTable<ChannelParams>,
    pub shrink_channels: ChannelTable<ChannelParams>,
}

impl SpeciesProfile {
    /// Time until a planted instance is fully grown.
    pub fn total_growth_duration(&self) -> f32 {
        self.growth_duration + self.convergence_duration
    }

    /// Time until a picked instance disappears.
    pub fn total_shrink_duration(&self) -> f32 {
        self.shrink_duration + self.convergence_duration
    }
}
