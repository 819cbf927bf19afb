use maud::{html, Markup, DOCTYPE};

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " | Homefinder" }
                link rel="icon" href="/static/favicon/favicon.ico";
                link rel="stylesheet" href="/static/main.css";
            }
            body {
                header class="site-header" {
                    a href="/" class="site-header__brand" { "Homefinder" }
                    nav {
                        ul {
                            li { a href="/" { "Home" } }
                            li { a href="/offers" { "Offers" } }
                            li { a href="/search" { "Search" } }
                        }
                    }
                }
                (content)
            }
        }
    }
}
