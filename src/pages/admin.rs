use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Card, CardContent,
    CardDescription, CardHeader, CardTitle, Input, Label, Spinner, Textarea,
};
use crate::editor::EditTarget;
use crate::forms::{create_user_request, ImportRequest, NewEcqPlayer};
use crate::models::{EcqPlayerRow, Role, UserRow};
use crate::state::AppContext;
use leptos::html;
use leptos::prelude::*;
use leptos::task::spawn_local;
use strum::IntoEnumIterator;

const SELECT_CLASS: &str = "h-8 rounded-md border border-input bg-transparent px-2 text-sm outline-none focus-visible:ring-2 focus-visible:ring-ring/50";

#[component]
fn FormMessages(
    error: RwSignal<Option<String>>,
    notice: RwSignal<Option<String>>,
) -> impl IntoView {
    view! {
        <Show when=move || error.get().is_some() fallback=|| ().into_view()>
            {move || {
                error.get().map(|e| view! {
                    <Alert class="border-destructive/30">
                        <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                    </Alert>
                })
            }}
        </Show>
        <Show when=move || notice.get().is_some() fallback=|| ().into_view()>
            {move || {
                notice.get().map(|n| view! {
                    <Alert>
                        <AlertDescription class="text-xs">{n}</AlertDescription>
                    </Alert>
                })
            }}
        </Show>
    }
}

#[component]
pub fn UsersPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let state = app_state.0;
    let users = state.users;

    let login: RwSignal<String> = RwSignal::new(String::new());
    let password: RwSignal<String> = RwSignal::new(String::new());
    let role: RwSignal<String> = RwSignal::new(Role::Streamer.to_string());
    let loading: RwSignal<bool> = RwSignal::new(false);
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let notice: RwSignal<Option<String>> = RwSignal::new(None);

    let on_create = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let req = match create_user_request(
            &login.get_untracked(),
            &role.get_untracked(),
            &password.get_untracked(),
        ) {
            Ok(req) => req,
            Err(e) => {
                error.set(Some(e));
                return;
            }
        };

        let api_client = state.api_client.get_untracked();
        loading.set(true);
        error.set(None);
        notice.set(None);

        spawn_local(async move {
            match api_client.create_user(&req).await {
                Ok(_) => {
                    let _ = users.try_update(|rows| {
                        rows.push(UserRow {
                            login: req.login.clone(),
                            role: req.role.clone(),
                        })
                    });
                    let _ = notice.try_set(Some(format!("Created {}", req.login)));
                    let _ = login.try_set(String::new());
                    let _ = password.try_set(String::new());
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
                    <CardTitle>"Users"</CardTitle>
                    <CardDescription>"Double-click a role to change it."</CardDescription>
                </CardHeader>
                <CardContent>
                    <table class="w-full text-sm">
                        <thead class="text-left text-xs text-muted-foreground">
                            <tr>
                                <th class="py-2">"Login"</th>
                                <th>"Role"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            {move || {
                                users
                                    .get()
                                    .into_iter()
                                    .map(|row| view! { <UserRowView row=row /> })
                                    .collect_view()
                            }}
                        </tbody>
                    </table>
                </CardContent>
            </Card>

            <Card>
                <CardHeader>
                    <CardTitle>"Create user"</CardTitle>
                </CardHeader>
                <CardContent>
                    <form class="flex flex-col gap-3" on:submit=on_create>
                        <div class="flex flex-col gap-1.5">
                            <Label html_for="new-login" class="text-xs">"Login"</Label>
                            <Input id="new-login" bind_value=login class="h-8 text-sm" />
                        </div>
                        <div class="flex flex-col gap-1.5">
                            <Label html_for="new-password" class="text-xs">"Password"</Label>
                            <Input id="new-password" r#type="password" bind_value=password class="h-8 text-sm" />
                        </div>
                        <div class="flex flex-col gap-1.5">
                            <Label html_for="new-role" class="text-xs">"Role"</Label>
                            <select
                                id="new-role"
                                class=SELECT_CLASS
                                prop:value=move || role.get()
                                on:change=move |ev| role.set(event_target_value(&ev))
                            >
                                {Role::iter()
                                    .map(|r| view! { <option value=r.to_string()>{r.to_string()}</option> })
                                    .collect_view()}
                            </select>
                        </div>
                        <FormMessages error=error notice=notice />
                        <Button size=ButtonSize::Sm attr:disabled=move || loading.get()>
                            <span class="inline-flex items-center gap-2">
                                <Show when=move || loading.get() fallback=|| ().into_view()>
                                    <Spinner />
                                </Show>
                                "Create user"
                            </span>
                        </Button>
                    </form>
                </CardContent>
            </Card>
        </div>
    }
}

#[component]
fn UserRowView(row: UserRow) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let state = app_state.0;

    let login = StoredValue::new(row.login.clone());
    let role = row.role.clone();

    let editing = Memo::new(move |_| {
        state
            .editor
            .with(|e| login.with_value(|l| e.is_editing(&EditTarget::UserRole(l.clone()))))
    });

    let select_ref: NodeRef<html::Select> = NodeRef::new();
    Effect::new(move |_| {
        if let Some(el) = select_ref.get() {
            let _ = el.focus();
        }
    });

    let on_delete = move |_| {
        let api_client = state.api_client.get_untracked();
        let target = login.get_value();
        spawn_local(async move {
            match api_client.delete_user(&target).await {
                Ok(()) => {
                    state.remove_user(&target);
                }
                Err(e) => {
                    let _ = state.status.try_set(Some(e.to_string()));
                }
            }
        });
    };

    let role_for_text = role.clone();
    let role_for_select = role.clone();

    view! {
        <tr class="border-t">
            <td class="py-2 font-medium">{row.login}</td>
            <td class="py-2">
                <Show
                    when=move || editing.get()
                    fallback=move || {
                        let current = role_for_text.clone();
                        let shown = role_for_text.clone();
                        view! {
                            <span
                                class="user-role cursor-text"
                                title="Double-click to change"
                                on:dblclick=move |_| {
                                    state.begin_edit(EditTarget::UserRole(login.get_value()), &current)
                                }
                            >
                                {shown}
                            </span>
                        }
                    }
                >
                    {
                        let current = role_for_select.clone();
                        view! {
                            <select
                                node_ref=select_ref
                                class=format!("user-role-edit {SELECT_CLASS}")
                                on:change=move |ev| state.set_draft(event_target_value(&ev))
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
                            >
                                {Role::iter()
                                    .map(|r| {
                                        let value = r.to_string();
                                        let selected = value == current;
                                        view! { <option value=value.clone() selected=selected>{value.clone()}</option> }
                                    })
                                    .collect_view()}
                            </select>
                        }
                    }
                </Show>
            </td>
            <td class="py-2 text-right">
                <Button variant=ButtonVariant::Destructive size=ButtonSize::Sm on:click=on_delete>
                    "Delete"
                </Button>
            </td>
        </tr>
    }
}

#[component]
pub fn EcqPlayersPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let state = app_state.0;
    let players = state.ecq_players;

    let name: RwSignal<String> = RwSignal::new(String::new());
    let deck_name: RwSignal<String> = RwSignal::new(String::new());
    let deck_list: RwSignal<String> = RwSignal::new(String::new());
    let loading: RwSignal<bool> = RwSignal::new(false);
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let notice: RwSignal<Option<String>> = RwSignal::new(None);

    let on_add = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let player = match NewEcqPlayer::new(
            &name.get_untracked(),
            &deck_name.get_untracked(),
            &deck_list.get_untracked(),
        ) {
            Ok(p) => p,
            Err(e) => {
                error.set(Some(e));
                return;
            }
        };

        let api_client = state.api_client.get_untracked();
        loading.set(true);
        error.set(None);
        notice.set(None);

        spawn_local(async move {
            match api_client.add_ecq_player(&player).await {
                Ok(body) => {
                    let _ = players.try_update(|rows| {
                        rows.push(EcqPlayerRow {
                            name: player.name.clone(),
                            deck_name: player.deck_name.clone(),
                            deck_list: player.deck_list.clone(),
                        })
                    });
                    let message = if body.trim().is_empty() {
                        format!("Added {}", player.name)
                    } else {
                        body
                    };
                    let _ = notice.try_set(Some(message));
                    let _ = name.try_set(String::new());
                    let _ = deck_name.try_set(String::new());
                    let _ = deck_list.try_set(String::new());
                }
                Err(e) => {
                    let _ = error.try_set(Some(e.to_string()));
                }
            }
            let _ = loading.try_set(false);
        });
    };

    let on_delete = move |player: String| {
        let api_client = state.api_client.get_untracked();
        spawn_local(async move {
            match api_client.delete_ecq_player(&player).await {
                Ok(()) => {
                    let _ = players.try_update(|rows| rows.retain(|r| r.name != player));
                }
                Err(e) => {
                    let _ = state.status.try_set(Some(e.to_string()));
                }
            }
        });
    };

    view! {
        <div class="space-y-4">
            <Card>
                <CardHeader>
                    <CardTitle>"ECQ players"</CardTitle>
                    <CardDescription>{move || format!("{} registered", players.with(|p| p.len()))}</CardDescription>
                </CardHeader>
                <CardContent>
                    <table class="w-full text-sm">
                        <tbody>
                            {move || {
                                players
                                    .get()
                                    .into_iter()
                                    .map(|row| {
                                        let target = row.name.clone();
                                        view! {
                                            <tr class="border-t align-top">
                                                <td class="py-2 pr-3 font-medium">{row.name}</td>
                                                <td class="py-2 pr-3">{row.deck_name}</td>
                                                <td class="py-2">
                                                    <pre class="max-h-32 overflow-auto text-xs">{row.deck_list}</pre>
                                                </td>
                                                <td class="py-2 text-right">
                                                    <Button
                                                        variant=ButtonVariant::Destructive
                                                        size=ButtonSize::Sm
                                                        on:click=move |_| on_delete(target.clone())
                                                    >
                                                        "Delete"
                                                    </Button>
                                                </td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </tbody>
                    </table>
                </CardContent>
            </Card>

            <Card>
                <CardHeader>
                    <CardTitle>"Add player"</CardTitle>
                </CardHeader>
                <CardContent>
                    <form class="flex flex-col gap-3" on:submit=on_add>
                        <div class="flex flex-col gap-1.5">
                            <Label html_for="ecq-name" class="text-xs">"Player name"</Label>
                            <Input id="ecq-name" placeholder="Name+1234" bind_value=name class="h-8 text-sm" />
                        </div>
                        <div class="flex flex-col gap-1.5">
                            <Label html_for="ecq-deck" class="text-xs">"Deck name"</Label>
                            <Input id="ecq-deck" bind_value=deck_name class="h-8 text-sm" />
                        </div>
                        <div class="flex flex-col gap-1.5">
                            <Label html_for="ecq-list" class="text-xs">"Deck list"</Label>
                            <Textarea id="ecq-list" bind_value=deck_list rows=8 />
                        </div>
                        <FormMessages error=error notice=notice />
                        <Button size=ButtonSize::Sm attr:disabled=move || loading.get()>"Add player"</Button>
                    </form>
                </CardContent>
            </Card>
        </div>
    }
}

#[component]
pub fn ImportPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let state = app_state.0;

    let uuid: RwSignal<String> = RwSignal::new(String::new());
    let season: RwSignal<String> = RwSignal::new(String::new());
    let tournament_type: RwSignal<String> = RwSignal::new("ECQ".to_string());
    let loading: RwSignal<bool> = RwSignal::new(false);
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let notice: RwSignal<Option<String>> = RwSignal::new(None);

    let on_import = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        // Bad input never reaches the network.
        let req = match ImportRequest::new(
            &uuid.get_untracked(),
            &season.get_untracked(),
            &tournament_type.get_untracked(),
        ) {
            Ok(req) => req,
            Err(e) => {
                error.set(Some(e));
                return;
            }
        };

        let api_client = state.api_client.get_untracked();
        loading.set(true);
        error.set(None);
        notice.set(None);

        spawn_local(async move {
            match api_client.import_tournament(&req).await {
                Ok(body) => {
                    let message = if body.trim().is_empty() {
                        format!("Imported {}", req.battlefy_uuid)
                    } else {
                        body
                    };
                    let _ = notice.try_set(Some(message));
                }
                Err(e) => {
                    let _ = error.try_set(Some(e.to_string()));
                }
            }
            let _ = loading.try_set(false);
        });
    };

    view! {
        <Card>
            <CardHeader>
                <CardTitle>"Import tournament"</CardTitle>
                <CardDescription>"Pull results from Battlefy into a season."</CardDescription>
            </CardHeader>
            <CardContent>
                <form class="flex flex-col gap-3" on:submit=on_import>
                    <div class="flex flex-col gap-1.5">
                        <Label html_for="import-uuid" class="text-xs">"Battlefy tournament id"</Label>
                        <Input id="import-uuid" bind_value=uuid class="h-8 text-sm" />
                    </div>
                    <div class="flex gap-3">
                        <div class="flex flex-col gap-1.5">
                            <Label html_for="import-season" class="text-xs">"Season (1-4)"</Label>
                            <Input id="import-season" r#type="number" bind_value=season class="h-8 w-24 text-sm" />
                        </div>
                        <div class="flex flex-1 flex-col gap-1.5">
                            <Label html_for="import-type" class="text-xs">"Tournament type"</Label>
                            <Input id="import-type" bind_value=tournament_type class="h-8 text-sm" />
                        </div>
                    </div>
                    <FormMessages error=error notice=notice />
                    <Button size=ButtonSize::Sm attr:disabled=move || loading.get()>
                        {move || if loading.get() { "Importing..." } else { "Import" }}
                    </Button>
                </form>
            </CardContent>
        </Card>
    }
}
