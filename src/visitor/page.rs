//! The admin page listing recent visitors.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::{
    html::{
        CARD_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        base,
    },
    internal_server_error::into_page_response,
    visitor::{VisitorLog, VisitorLogEntry},
};

/// Display the visitor log, newest visit first.
pub async fn get_visitors_page(State(visitor_log): State<VisitorLog>) -> Response {
    match visitor_log.read_all().await {
        Ok(entries) => {
            let mut entries = entries.unwrap_or_default();
            entries.reverse();
            base("Visitors", &visitors_view(&entries)).into_response()
        }
        Err(error) => into_page_response(error),
    }
}

fn visitors_view(entries: &[VisitorLogEntry]) -> Markup {
    html! {
        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="flex justify-between items-baseline w-full mb-4"
            {
                h1 class="text-2xl font-bold" { "Visitors" }
                span id="visitor-count" class="text-sm text-gray-600 dark:text-gray-400"
                {
                    (entries.len()) " visits"
                }
            }

            @if entries.is_empty() {
                div class=(CARD_STYLE)
                {
                    p { "No visitor data found yet. Start browsing your site to see logs!" }
                }
            } @else {
                table class="w-full text-sm text-left"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th class=(TABLE_CELL_STYLE) { "Time" }
                            th class=(TABLE_CELL_STYLE) { "IP" }
                            th class=(TABLE_CELL_STYLE) { "Page" }
                            th class=(TABLE_CELL_STYLE) { "User Agent" }
                            th class=(TABLE_CELL_STYLE) { "Location" }
                        }
                    }

                    tbody
                    {
                        @for entry in entries {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td class=(TABLE_CELL_STYLE) { (entry.timestamp) }
                                td class=(TABLE_CELL_STYLE) { (entry.ip) }
                                td class=(TABLE_CELL_STYLE) { (entry.url) }
                                td class=(TABLE_CELL_STYLE) { (entry.user_agent) }
                                td class=(TABLE_CELL_STYLE) { (entry.city) ", " (entry.country) }
                            }
                        }
                    }
                }
            }
        }
    }
}
