//! Randomized blog post data drawn from small fixed pools.

use blog_core::domain::{Author, BlogPostData};
use blog_shared::dto::{AuthorDto, CreatePostRequest};
use chrono::{DateTime, Duration, SubsecRound, Utc};
use rand::Rng;
use rand::seq::SliceRandom;

const FIRST_NAMES: [&str; 6] = [
    "Engelbert",
    "Throckmorton",
    "Phineas",
    "Amelia",
    "Gertrude",
    "Myrtle",
];

const LAST_NAMES: [&str; 6] = [
    "Rockefeller",
    "Washington",
    "Lincoln",
    "Truth",
    "Yusufzai",
    "Clinton",
];

const TITLES: [&str; 4] = [
    "Much Ado About JavaScript",
    "The Picture of Dorian Mongoose",
    "Pride and Prototypes",
    "Fifty Shades of False",
];

const CONTENTS: [&str; 3] = [
    "Lorem ipsum dolor sit amet, an sonet tibique appetere est. Has iuvaret fabulas \
     molestie at, no quo nostrud intellegat. Ut eros mandamus cum, timeam quaeque no duo.",
    "Mel scripta iudicabit philosophia et, has imperdiet gubergren ad. Et ius novum \
     suscipit, mel ne iisque noluisse signiferumque, ut pro ubique bonorum consetetur.",
    "Tantas mentitum maiestatis sed ei, diam tation bonorum sed ei. At vidit essent nam. \
     Sea ea conceptam adversarium ullamcorper, eos an aperiam vituperata.",
];

/// Up to a year back.
const MAX_AGE_MS: i64 = 365 * 24 * 60 * 60 * 1000;

fn pick(pool: &[&str]) -> String {
    pool.choose(&mut rand::thread_rng())
        .expect("fixture pools are non-empty")
        .to_string()
}

pub fn author() -> Author {
    Author::new(pick(&FIRST_NAMES), pick(&LAST_NAMES))
}

pub fn title() -> String {
    pick(&TITLES)
}

pub fn content() -> String {
    pick(&CONTENTS)
}

/// A random instant in the past, at millisecond precision.
pub fn created() -> DateTime<Utc> {
    let age = rand::thread_rng().gen_range(1..MAX_AGE_MS);
    (Utc::now() - Duration::milliseconds(age)).trunc_subsecs(3)
}

/// A well-formed post with every field populated.
pub fn blog_post_data() -> BlogPostData {
    let data = BlogPostData {
        author: author(),
        title: title(),
        content: content(),
        created: Some(created()),
    };
    data.validate().expect("fixture data is well-formed");
    data
}

/// The POST body a client would send for `data`.
pub fn create_request(data: &BlogPostData) -> CreatePostRequest {
    CreatePostRequest {
        author: Some(AuthorDto {
            first_name: data.author.first_name.clone(),
            last_name: data.author.last_name.clone(),
        }),
        title: Some(data.title.clone()),
        content: Some(data.content.clone()),
        created: data.created,
    }
}
