use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Card, CardAction, CardContent,
    CardDescription, CardHeader, CardTitle, Input, Label, Spinner,
};
use crate::editor::EditTarget;
use crate::links::{camera_selector_class, refresh_links, RosterLinks, UrlBuilder};
use crate::models::{GeneratedResources, ResourcesRequest};
use crate::roster::DeckCard;
use crate::state::AppContext;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn StreamPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let state = app_state.0;
    let roster = state.roster;

    let opponents_id: RwSignal<String> = RwSignal::new(String::new());
    let loading: RwSignal<bool> = RwSignal::new(false);
    let error: RwSignal<Option<String>> = RwSignal::new(None);

    // Every href on this page comes from here; any roster change refreshes all of them.
    let links = Memo::new(move |_| {
        let base = state.api_client.with(|c| c.base_url().to_string());
        roster.with(|r| refresh_links(&base, r))
    });

    // Cards only re-mount when the roster shape changes, not on every keystroke.
    let card_keys = Memo::new(move |_| {
        roster.with(|r| {
            r.cards
                .iter()
                .enumerate()
                .map(|(i, c)| (i, c.player.clone(), c.deck_key()))
                .collect::<Vec<_>>()
        })
    });

    let on_fetch = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let id = opponents_id.get_untracked().trim().to_string();
        if id.is_empty() {
            error.set(Some("Enter an opponent list id".to_string()));
            return;
        }

        let api_client = state.api_client.get_untracked();
        loading.set(true);
        error.set(None);

        spawn_local(async move {
            match api_client.opponents_info(&id).await {
                Ok(res) => {
                    log::info!("loaded {} opponents for {id}", res.opponents.len());
                    state.replace_opponents(res.opponents);
                }
                Err(e) => {
                    let _ = error.try_set(Some(e.to_string()));
                }
            }
            let _ = loading.try_set(false);
        });
    };

    view! {
        <div class="space-y-4">
            <Card>
                <CardHeader>
                    <CardTitle>"Stream decks"</CardTitle>
                    <CardDescription>
                        "Double-click a deck name to rename it. Scores and the main camera feed the side panel."
                    </CardDescription>
                </CardHeader>
                <CardContent>
                    <form class="flex items-end gap-2" on:submit=on_fetch>
                        <div class="flex flex-1 flex-col gap-1.5">
                            <Label html_for="opponents-id" class="text-xs">"Opponent list"</Label>
                            <Input id="opponents-id" placeholder="Opponent list id" bind_value=opponents_id class="h-8 text-sm" />
                        </div>
                        <Button size=ButtonSize::Sm attr:disabled=move || loading.get()>
                            <span class="inline-flex items-center gap-2">
                                <Show when=move || loading.get() fallback=|| ().into_view()>
                                    <Spinner />
                                </Show>
                                "Load opponents"
                            </span>
                        </Button>
                    </form>

                    <Show when=move || error.get().is_some() fallback=|| ().into_view()>
                        {move || {
                            error.get().map(|e| view! {
                                <Alert class="mt-3 border-destructive/30">
                                    <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                                </Alert>
                            })
                        }}
                    </Show>
                </CardContent>
            </Card>

            <SidePanelLink links=links />

            <div id="opponents" class="grid gap-4 md:grid-cols-2">
                <For
                    each=move || card_keys.get()
                    key=|k| k.clone()
                    children=move |(index, _, _)| view! { <DeckCardView index=index links=links /> }
                />
            </div>

            <Show when=move || card_keys.with(|k| k.is_empty()) fallback=|| ().into_view()>
                <div class="text-xs text-muted-foreground">"No decks loaded."</div>
            </Show>
        </div>
    }
}

#[component]
fn SidePanelLink(links: Memo<RosterLinks>) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let roster = app_state.0.roster;

    view! {
        <Card class="gap-2 py-4">
            <CardContent class="flex flex-col gap-2 px-4">
                <div class="flex items-center justify-between gap-2">
                    <a
                        id="side-panel-link"
                        class="text-sm font-medium text-primary underline underline-offset-4"
                        href=move || links.with(|l| l.panel.clone())
                        target="_blank"
                    >
                        "Streaming side panel"
                    </a>
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Sm
                        on:click=move |_| roster.update(|r| r.select_main_cam(None))
                    >
                        "Clear main camera"
                    </Button>
                </div>
                <code class="break-all text-xs text-muted-foreground">{move || links.with(|l| l.panel.clone())}</code>
            </CardContent>
        </Card>
    }
}

#[component]
fn DeckCardView(index: usize, links: Memo<RosterLinks>) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let state = app_state.0;
    let roster = state.roster;

    let card = move || roster.with(|r| r.cards.get(index).cloned());
    let player = move || card().map(|c| c.player).unwrap_or_default();
    let deck_name = move || card().map(|c| c.deck_name().to_string()).unwrap_or_default();
    let has_deck = move || card().is_some_and(|c| c.deck.is_some());
    let hidden = move || card().is_some_and(|c| c.hidden);
    let deck_list = move || card().and_then(|c| c.deck).and_then(|d| d.list);
    let deck_links = move || links.with(|l| l.decks.get(index).cloned().flatten());
    let deck_key = move || roster.with(|r| r.cards.get(index).and_then(DeckCard::deck_key));

    let editing = Memo::new(move |_| {
        let Some(key) = deck_key() else {
            return false;
        };
        state
            .editor
            .with(|e| e.is_editing(&EditTarget::DeckName(key)))
    });

    let edit_ref: NodeRef<html::Input> = NodeRef::new();
    Effect::new(move |_| {
        if let Some(el) = edit_ref.get() {
            let _ = el.focus();
        }
    });

    let cam_id = camera_selector_class(&roster.with_untracked(|r| {
        r.cards.get(index).map(|c| c.player.clone()).unwrap_or_default()
    }));
    let cam_class = cam_id.clone();

    view! {
        <div class=move || if hidden() { "opacity-50" } else { "" }>
            <Card class="deck-card gap-3 py-4">
                <CardHeader class="px-4">
                    <CardTitle class="text-base player-name">{player}</CardTitle>
                    <CardAction>
                        <Button
                            variant=ButtonVariant::Outline
                            size=ButtonSize::Sm
                            on:click=move |_| roster.update(|r| r.toggle_hidden(index))
                        >
                            {move || if hidden() { "Show" } else { "Hide" }}
                        </Button>
                    </CardAction>
                </CardHeader>

                <CardContent class="flex flex-col gap-3 px-4">
                    <Show
                        when=has_deck
                        fallback=|| view! { <div class="text-xs text-muted-foreground">"Deck cannot be parsed"</div> }
                    >
                        <Show
                            when=move || editing.get()
                            fallback=move || view! {
                                <span
                                    class="deck-name cursor-text text-sm font-medium"
                                    title="Double-click to rename"
                                    on:dblclick=move |_| {
                                        if let Some(key) = deck_key() {
                                            state.begin_edit(EditTarget::DeckName(key), &deck_name());
                                        }
                                    }
                                >
                                    {deck_name}
                                </span>
                            }
                        >
                            {move || {
                                let initial = roster.with_untracked(|r| {
                                    r.cards.get(index).map(|c| c.deck_name().to_string()).unwrap_or_default()
                                });
                                view! {
                                    <input
                                        node_ref=edit_ref
                                        class="deck-name-edit h-8 w-full rounded-md border border-input bg-transparent px-2 text-sm outline-none focus-visible:ring-2 focus-visible:ring-ring/50"
                                        value=initial
                                        on:input=move |ev| state.set_draft(event_target_value(&ev))
                                        on:keydown=move |ev: web_sys::KeyboardEvent| {
                                            match ev.key().as_str() {
                                                "Enter" => {
                                                    ev.prevent_default();
                                                    state.commit_edit();
                                                }
                                                "Escape" => state.cancel_edit(),
                                                _ => {}
                                            }
                                        }
                                    />
                                }
                            }}
                        </Show>

                        {move || {
                            deck_links().map(|l| view! {
                                <div class="flex gap-3 text-xs">
                                    <a class="download-left text-primary underline underline-offset-4" href=l.left target="_blank">
                                        "Left overlay"
                                    </a>
                                    <a class="download-right text-primary underline underline-offset-4" href=l.right target="_blank">
                                        "Right overlay"
                                    </a>
                                </div>
                            })
                        }}

                        {move || {
                            deck_list().map(|list| view! {
                                <pre class="max-h-48 overflow-auto rounded-md bg-muted p-2 text-xs">{list}</pre>
                            })
                        }}
                    </Show>

                    <div class="flex items-center gap-3">
                        <input
                            class="score h-8 w-24 rounded-md border border-input bg-transparent px-2 text-sm outline-none"
                            placeholder="Score"
                            prop:value=move || card().map(|c| c.score).unwrap_or_default()
                            on:input=move |ev| {
                                let v = event_target_value(&ev);
                                roster.update(|r| r.set_score(index, v));
                            }
                        />
                        <label class="inline-flex items-center gap-2 text-xs">
                            <input
                                type="radio"
                                name="main-cam"
                                id=cam_id
                                class=cam_class
                                prop:checked=move || {
                                    let p = player();
                                    roster.with(|r| r.main_cam.as_deref() == Some(p.as_str()))
                                }
                                on:change=move |_| roster.update(|r| r.select_main_cam(Some(player())))
                            />
                            "Main camera"
                        </label>
                    </div>
                </CardContent>
            </Card>
        </div>
    }
}

#[component]
pub fn ResourcesPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let api_client = app_state.0.api_client;

    let players: RwSignal<String> = RwSignal::new(String::new());
    let p1score: RwSignal<String> = RwSignal::new(String::new());
    let p2score: RwSignal<String> = RwSignal::new(String::new());
    let loading: RwSignal<bool> = RwSignal::new(false);
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let generated: RwSignal<Option<GeneratedResources>> = RwSignal::new(None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let body = ResourcesRequest {
            players: players.get_untracked(),
            p1score: p1score.get_untracked(),
            p2score: p2score.get_untracked(),
        };
        let client = api_client.get_untracked();

        loading.set(true);
        error.set(None);

        spawn_local(async move {
            match client.generate_resources(&body).await {
                Ok(res) => {
                    let _ = generated.try_set(Some(res));
                }
                Err(e) => {
                    let _ = error.try_set(Some(e.to_string()));
                }
            }
            let _ = loading.try_set(false);
        });
    };

    let image_url = move |file: &str| {
        let base = api_client.with_untracked(|c| c.base_url().to_string());
        UrlBuilder::new(&base, file).build()
    };

    view! {
        <Card>
            <CardHeader>
                <CardTitle>"Overlay resources"</CardTitle>
                <CardDescription>"Render the left/right overlay images for the current match."</CardDescription>
            </CardHeader>
            <CardContent class="flex flex-col gap-4">
                <form class="flex flex-col gap-3" on:submit=on_submit>
                    <div class="flex flex-col gap-1.5">
                        <Label html_for="matches" class="text-xs">"Players"</Label>
                        <Input id="matches" placeholder="Player one vs Player two" bind_value=players class="h-8 text-sm" />
                    </div>
                    <div class="flex gap-3">
                        <div class="flex flex-col gap-1.5">
                            <Label html_for="currentScorePlayer1" class="text-xs">"Player 1 score"</Label>
                            <Input id="currentScorePlayer1" bind_value=p1score class="h-8 w-24 text-sm" />
                        </div>
                        <div class="flex flex-col gap-1.5">
                            <Label html_for="currentScorePlayer2" class="text-xs">"Player 2 score"</Label>
                            <Input id="currentScorePlayer2" bind_value=p2score class="h-8 w-24 text-sm" />
                        </div>
                    </div>
                    <Button size=ButtonSize::Sm attr:id="generateResources" attr:disabled=move || loading.get()>
                        {move || if loading.get() { "Generating..." } else { "Generate resources" }}
                    </Button>
                </form>

                <Show when=move || error.get().is_some() fallback=|| ().into_view()>
                    {move || {
                        error.get().map(|e| view! {
                            <Alert class="border-destructive/30">
                                <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                            </Alert>
                        })
                    }}
                </Show>

                {move || {
                    generated.get().map(|g| view! {
                        <div class="grid grid-cols-2 gap-3">
                            <img class="rounded-md border" src=image_url(&g.left) alt=g.left.clone() />
                            <img class="rounded-md border" src=image_url(&g.right) alt=g.right.clone() />
                        </div>
                    })
                }}
            </CardContent>
        </Card>
    }
}
