// All tunable simulation constants in one place.

// Tank geometry
pub const WALL_WIDTH: f32 = 12.0;
pub const SURFACE_BAND: f32 = 56.0;

// Fish population
pub const INITIAL_FISH_COUNT: usize = 14;
pub const MAX_FISH: usize = 1000;

// Behavior timers (frames)
pub const FLOAT_TIMER_MIN: f32 = 30.0;
pub const FLOAT_TIMER_MAX: f32 = 1230.0;
pub const ACTIVE_TIMER_MIN: f32 = 60.0;
pub const ACTIVE_TIMER_MAX: f32 = 1260.0;
pub const LOOK_TIMER_HOLD: f32 = 30.0;

// Motion
pub const FLOAT_JITTER: f32 = 0.025;
pub const SWIM_ACCEL: f32 = 0.1;
pub const SWIM_MAX_SPEED: f32 = 2.5;
pub const SWIM_BOB_AMPLITUDE: f32 = 0.1;
pub const EXPLORE_GAIN_X: f32 = 0.7;
pub const EXPLORE_GAIN_Y: f32 = 0.4;
pub const FOOD_GAIN_X: f32 = 0.3;
pub const FOOD_GAIN_Y: f32 = 0.2;
pub const STEER_DEADZONE: f32 = 6.0;
pub const BACKWARD_SWIM_DAMP: f32 = 0.25;
pub const AMBIENT_BOB_AMPLITUDE: f32 = 0.08;

// Predation and feeding
pub const EAT_RADIUS_FACTOR: f32 = 0.7;
pub const EAT_SLACK: f32 = 8.0;
pub const PREDATION_MIN_REACH: f32 = 32.0;
pub const PREDATION_SIZE_RATIO: f32 = 0.7;

// Eggs
pub const EGG_LAYING_PROBABILITY: f32 = 0.0002;
pub const EGG_HATCH_MIN: f32 = 1000.0;
pub const EGG_HATCH_MAX: f32 = 7000.0;
pub const EGG_DRAG: f32 = 0.96;
pub const EGG_SINK_PULL: f32 = 0.05;
pub const EGG_RESTITUTION: f32 = -0.3;
pub const EGG_RADIUS_MIN: f32 = 2.5;
pub const EGG_RADIUS_MAX: f32 = 4.5;

// Food pellets
pub const PELLET_RADIUS_MIN: f32 = 2.5;
pub const PELLET_RADIUS_MAX: f32 = 4.5;
pub const PELLET_RISE_SPEED: f32 = 0.9;
pub const PELLET_REST_DEPTH: f32 = WALL_WIDTH + SURFACE_BAND;
pub const PELLET_NOTICE_CHANCE: f64 = 0.25;

// Net event
pub const NET_SPAWN_PROBABILITY: f64 = 0.0006;
pub const NET_SWING_RATE: f32 = 0.004;
pub const NET_LIFETIME_STEPS: u32 = 1000;
pub const NET_POLE_FACTOR: f32 = 0.55;
pub const NET_RADIUS: f32 = 46.0;
pub const SCOOP_REMOVAL_MS: f64 = 1000.0;

// Lily pads
pub const MAX_LILY_PADS: usize = 8;
pub const LILY_PAD_SPAWN_CHANCE: f64 = 0.0015;
pub const PAD_DROP_MS: f64 = 700.0;
pub const PAD_BUG_CHANCE: f64 = 0.2;
pub const PAD_FLOWER_CHANCE: f64 = 0.1;

// Day/night cycle
pub const DAY_LENGTH_MS: f64 = 18_000.0;
pub const TRANSITION_MS: f64 = 1_000.0;

// Decor
pub const BUBBLE_COLUMN_COUNT: usize = 3;
pub const BUBBLES_PER_COLUMN: usize = 9;
pub const PLANT_COUNT: usize = 6;
pub const ROCK_COUNT: usize = 5;

// Camera
pub const CAMERA_ZOOM_MIN: f32 = 0.5;
pub const CAMERA_ZOOM_MAX: f32 = 3.0;
pub const CAMERA_ZOOM_SPEED: f32 = 0.1;
pub const CAMERA_SMOOTH_SPEED: f32 = 8.0;
