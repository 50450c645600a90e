use serde::Serialize;

/// One entry of the activity catalog offered after the proposal is accepted.
/// The catalog is compiled in; recipients never create activities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Activity {
    pub id: i64,
    pub emoji: &'static str,
    pub title: &'static str,
    pub response: &'static str,
    pub gif_url: &'static str,
}

pub const ACTIVITIES: &[Activity] = &[
    Activity {
        id: 1,
        emoji: "🍽️",
        title: "Fancy Dinner",
        response: "Ooh la la! 🥂 Time to put on those fancy pants and pretend we're rich! Just don't judge my table manners 😜",
        gif_url: "https://media.giphy.com/media/3o7TKqm1mNujcBPSpy/giphy.gif",
    },
    Activity {
        id: 2,
        emoji: "🍿",
        title: "Movie Marathon",
        response: "Netflix and actually chill! 🛋️ I promise not to fall asleep... maybe 😴💤",
        gif_url: "https://media.giphy.com/media/2zelCiUo5KJyN8MgMr/giphy.gif",
    },
    Activity {
        id: 3,
        emoji: "💃",
        title: "Dance Party",
        response: "Warning: My dance moves are FIRE! 🔥🕺 (Translation: I have no idea what I'm doing but I'll look confident 😎)",
        gif_url: "https://media.giphy.com/media/l0MYt5jPR6QX5pnqM/giphy.gif",
    },
    Activity {
        id: 4,
        emoji: "👨‍🍳",
        title: "Cook Together",
        response: "Gordon Ramsay is shaking! 👨‍🍳 (Please have the fire extinguisher ready 🧯😂)",
        gif_url: "https://media.giphy.com/media/xUPGcJGy8I928yIlAQ/giphy.gif",
    },
    Activity {
        id: 5,
        emoji: "🎨",
        title: "Arts & Crafts",
        response: "Time to get creative! 🖌️ We're basically Picasso... if Picasso had zero artistic talent but maximum enthusiasm! 😂🎨",
        gif_url: "https://media.giphy.com/media/ule4vhcY1xEKQ/giphy.gif",
    },
    Activity {
        id: 6,
        emoji: "🌟",
        title: "Surprise Me!",
        response: "Buckle up buttercup! 🎢 This is gonna be LEGENDARY! (I have absolutely no plan but we'll figure it out 😂✨)",
        gif_url: "https://media.giphy.com/media/artj92V8o75VENhke/giphy.gif",
    },
];

/// Look up a catalog entry by id.
pub fn find_activity(id: i64) -> Option<&'static Activity> {
    ACTIVITIES.iter().find(|a| a.id == id)
}
