//! Landing route and the Home -> Predict transition.

use crate::app::form::PredictForm;
use crate::app::navigation::{Navigation, Page};
use crate::app::render;
use axum::response::{Html, Redirect};
use axum_extra::extract::cookie::CookieJar;

pub async fn index(jar: CookieJar) -> Html<String> {
    match Navigation::from_jar(&jar).current() {
        Page::Home => Html(render::home_page()),
        Page::Predict => Html(render::predict_page(&PredictForm::default(), None)),
    }
}

pub async fn start(jar: CookieJar) -> (CookieJar, Redirect) {
    let mut navigation = Navigation::from_jar(&jar);
    navigation.start_prediction();
    (navigation.save(jar), Redirect::to("/"))
}
