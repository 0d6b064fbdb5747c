/// Frontend tuning constants: canvas wiring, point sizes, camera rig.
// Element ids expected in the host page
pub const CANVAS_ID: &str = "scene-canvas";
pub const MODAL_ID: &str = "quote-modal";
pub const MODAL_TEXT_ID: &str = "quote-text";

// Point sprite sizes (world units)
pub const PLANET_POINT_SIZE: f32 = 0.1;
pub const TEXT_POINT_SIZE: f32 = 0.05;
pub const STAR_POINT_SIZE: f32 = 0.7;

// Glow shell
pub const GLOW_RADIUS_FACTOR: f32 = 1.2;

// Quote billboards
pub const SPRITE_BASE_SCALE: f32 = 10.0;
pub const SPRITE_FONT_PX: f64 = 24.0;
pub const SPRITE_LINE_HEIGHT: f64 = 1.3;

// Camera rig
pub const ORBIT_DAMPING: f32 = 0.03; // lower = smoother
pub const ORBIT_ROTATE_SPEED: f32 = 0.8;
pub const ORBIT_PITCH_LIMIT: f32 = 1.55; // just shy of the poles
pub const ZOOM_SENSITIVITY: f32 = 0.001;
pub const ZOOM_LERP: f32 = 0.1;
pub const ZOOM_MIN_DISTANCE: f32 = 0.1;
pub const ZOOM_MAX_DISTANCE: f32 = 500.0;

// Glyph rasterization
pub const GLYPH_COMPACT_TEXT: &str = "\u{20BF}abd";
pub const GLYPH_COMPACT_FONT_PX: f64 = 70.0;
pub const GLYPH_COMPACT_CANVAS: (u32, u32) = (512, 128);
pub const GLYPH_EXPANDED_TEXT: &str = "\u{20BF}";
pub const GLYPH_EXPANDED_FONT_PX: f64 = 160.0;
pub const GLYPH_EXPANDED_CANVAS: (u32, u32) = (512, 512);
pub const GLYPH_DEPTH_LAYERS: u32 = 3;

/// Floating easter-egg texts; multi-line entries grow more on hover.
pub const QUOTE_TEXTS: &[&str] = &[
    "stack sats",
    "Don't trust, verify!",
    "Not your keys, not your coins!",
    "Fix the money, Fix the world",
    "21 Million",
    "tick tock, next block",
    "Open-source everything",
    "21M / \u{221E}",
    "Privacy is not a crime",
    "1 BTC = 1 BTC",
    "Run your own node!",
    "Sound money",
    "Inflation is theft",
    "Proof of Work",
    "Non-KYC",
    "Practice Agorism",
    "Use blind signatures!",
    "1984 is now",
    "Austrian economics",
    "A specter is haunting the modern world,\nthe specter of crypto anarchy.\n\u{2014} Tim May",
    "Strong cryptography can resist an unlimited\namount of violence. No amount of coercive force\nwill ever solve a math problem.\n\u{2014} Tim May",
    "Mathematics is not the law.\n\u{2014} Tim May",
    "Privacy is necessary for an open\nsociety in the electronic age.\n\u{2014} Eric Hughes",
    "Cypherpunks write code. We know that someone\nhas to write software to defend privacy.\n\u{2014} Eric Hughes",
    "We must defend our own privacy if we\nexpect to have any.\n\u{2014} Eric Hughes",
    "Cryptography is the ultimate form\nof non-violent direct action.\n\u{2014} Julian Assange",
    "If privacy is outlawed,\nonly outlaws will have privacy.\n\u{2014} Philip Zimmermann",
    "Trusted third parties are security holes.\n\u{2014} Nick Szabo",
    "Money, like written language, was one of the\nmost important inventions of civilization.\n\u{2014} Nick Szabo",
    "I see Bitcoin as ultimately becoming a\nreserve currency for banks.\n\u{2014} Hal Finney",
    "Bitcoin seems to be a very promising idea.\nI like the idea of basing security on\ncomputational difficulty.\n\u{2014} Hal Finney",
    "The Net interprets censorship\nas damage and routes around it.\n\u{2014} John Gilmore",
    "Encryption works. Properly implemented\nstrong crypto systems are one of the few\nthings that you can rely on.\n\u{2014} Edward Snowden",
    "Security is a process, not a product.\n\u{2014} Bruce Schneier",
    "Talk is cheap. Show me the code.\n\u{2014} Linus Torvalds",
    "Free software is a matter of liberty,\nnot price. Think of 'free' as in\n'free speech,' not as in 'free beer.'\n\u{2014} Richard Stallman",
    "End-to-end encryption should be the default\nfor all communication.\n\u{2014} Moxie Marlinspike",
    "Cryptography rearranges power: it configures\nwho can do what, from what. This makes\ncryptography an inherently political tool.\n\u{2014} Phillip Rogaway",
    "A cashless economy is\na surveillance economy.\n\u{2014} Jerry Brito",
    "The keyboard is the great equalizer \u{2014}\nbetter than the Glock .45.\n\u{2014} St. Jude",
    "Bitcoin is the most significant computer science\nbreakthrough in the last 20 years.\n\u{2014} Adam Back",
    "WE STAND TODAY on the brink\nof a revolution in cryptography.\n\u{2014} Diffie & Hellman",
];
