use crate::api::ApiErrorKind;
use crate::checkin::{normalize_bearer, CheckInBatch, CheckInStatus};
use crate::components::ui::{
    Alert, AlertDescription, Badge, Button, ButtonSize, ButtonVariant, Card, CardContent,
    CardDescription, CardHeader, CardTitle, Input, Label, Spinner, Textarea, BADGE_DANGER,
    BADGE_MUTED, BADGE_SUCCESS, BADGE_WARNING,
};
use crate::links::deck_image_url;
use crate::models::Registration;
use crate::state::AppContext;
use crate::stats::{parse_player_ids, StatsTable};
use crate::validation::{name_issues, DeckStatus, NameIssue};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Registered players with their deck and name checks.
#[component]
pub fn RegistrationsPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let state = app_state.0;
    let registrations = state.registrations;

    let statuses: RwSignal<Vec<DeckStatus>> = RwSignal::new(vec![]);

    // One independent lookup per deck; a late answer after unmount is dropped.
    Effect::new(move |_| {
        let regs = registrations.get_untracked();
        statuses.set(vec![DeckStatus::Pending; regs.len()]);

        let api_client = state.api_client.get_untracked();
        for (index, reg) in regs.into_iter().enumerate() {
            let Some(url) = reg.deck_url.filter(|u| !u.trim().is_empty()) else {
                continue;
            };
            let api_client = api_client.clone();
            spawn_local(async move {
                match api_client.validate_deck(&url).await {
                    Ok(v) => {
                        let _ = statuses.try_update(|s| {
                            if let Some(slot) = s.get_mut(index) {
                                *slot = DeckStatus::from(v);
                            }
                        });
                    }
                    Err(e) => log::warn!("deck validation for {url} failed: {e}"),
                }
            });
        }
    });

    view! {
        <Card>
            <CardHeader>
                <CardTitle>"Registrations"</CardTitle>
                <CardDescription>
                    {move || format!("{} players", registrations.with(|r| r.len()))}
                </CardDescription>
            </CardHeader>
            <CardContent>
                <table class="w-full text-sm">
                    <thead class="text-left text-xs text-muted-foreground">
                        <tr>
                            <th class="py-2">"Player"</th>
                            <th>"Eternal"</th>
                            <th>"Discord"</th>
                            <th>"Deck"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            registrations
                                .get()
                                .into_iter()
                                .enumerate()
                                .map(|(index, reg)| view! { <RegistrationRow index=index reg=reg statuses=statuses /> })
                                .collect_view()
                        }}
                    </tbody>
                </table>
            </CardContent>
        </Card>
    }
}

fn name_cell(name: String, issue: Option<NameIssue>) -> impl IntoView {
    view! {
        <td class="py-2">
            <span class="mr-2">{name}</span>
            {issue.map(|i| view! { <Badge class=BADGE_WARNING>{i.message()}</Badge> })}
        </td>
    }
}

#[component]
fn RegistrationRow(
    index: usize,
    reg: Registration,
    statuses: RwSignal<Vec<DeckStatus>>,
) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let base = app_state.0.api_client.with_untracked(|c| c.base_url().to_string());

    let issues = name_issues(&reg);
    let eternal_issue = issues.iter().copied().find(|i| *i == NameIssue::EternalName);
    let discord_issue = issues.iter().copied().find(|i| *i == NameIssue::DiscordName);

    let status = move || statuses.with(|s| s.get(index).cloned().unwrap_or_default());

    let deck_cell = match reg.deck_url.clone().filter(|u| !u.trim().is_empty()) {
        None => view! { <span class="text-xs text-muted-foreground">"No deck"</span> }.into_any(),
        Some(url) => {
            let image = deck_image_url(&base, &url, &reg.deck_name, &reg.player);
            let label = if reg.deck_name.is_empty() { url.clone() } else { reg.deck_name.clone() };
            view! {
                <div class="flex flex-col gap-1">
                    <div class="flex items-center gap-2">
                        <a class="text-primary underline underline-offset-4" href=url target="_blank">{label}</a>
                        <a class="text-xs text-muted-foreground underline" href=image target="_blank">"Image"</a>
                        {move || match status() {
                            DeckStatus::Pending => view! { <Badge class=BADGE_MUTED>"Pending"</Badge> }.into_any(),
                            DeckStatus::Validated => view! { <Badge class=BADGE_SUCCESS>"Validated"</Badge> }.into_any(),
                            DeckStatus::Invalid(_) => view! { <Badge class=BADGE_DANGER>"Invalid deck"</Badge> }.into_any(),
                        }}
                    </div>
                    {move || match status() {
                        DeckStatus::Invalid(messages) => messages
                            .into_iter()
                            .map(|m| view! {
                                <Alert class="deck-notification border-destructive/30 py-2">
                                    <AlertDescription class="text-destructive text-xs">{m}</AlertDescription>
                                </Alert>
                            })
                            .collect_view()
                            .into_any(),
                        _ => ().into_any(),
                    }}
                </div>
            }
            .into_any()
        }
    };

    view! {
        <tr class="border-t align-top">
            <td class="py-2 font-medium">{reg.player.clone()}</td>
            {name_cell(reg.eternal_name.clone(), eternal_issue)}
            {name_cell(reg.discord_name.clone(), discord_issue)}
            <td class="py-2">{deck_cell}</td>
        </tr>
    }
}

#[component]
pub fn StatsPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let state = app_state.0;

    let players: RwSignal<String> = RwSignal::new(String::new());
    let loading: RwSignal<bool> = RwSignal::new(false);
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let table: RwSignal<Option<StatsTable>> = RwSignal::new(None);

    let on_fetch = move |_| {
        let ids = parse_player_ids(&players.get_untracked());
        if ids.is_empty() {
            error.set(Some("Enter at least one player".to_string()));
            return;
        }

        let api_client = state.api_client.get_untracked();
        loading.set(true);
        error.set(None);

        spawn_local(async move {
            match api_client.player_stats(&ids).await {
                // Replaces whatever table was shown before.
                Ok(res) => {
                    let _ = table.try_set(Some(StatsTable::from(res).ordered_by(&ids)));
                }
                Err(e) => {
                    let _ = error.try_set(Some(e.to_string()));
                }
            }
            let _ = loading.try_set(false);
        });
    };

    let fill_registered = move |_| {
        let names = state
            .registrations
            .with_untracked(|r| r.iter().map(|p| p.player.clone()).collect::<Vec<_>>());
        players.set(names.join("\n"));
    };

    view! {
        <Card>
            <CardHeader>
                <CardTitle>"Player stats"</CardTitle>
                <CardDescription>"Per tournament type, one player per line or comma-separated."</CardDescription>
            </CardHeader>
            <CardContent class="flex flex-col gap-4">
                <div class="flex flex-col gap-3">
                    <Textarea id="stats-players" bind_value=players rows=4 />
                    <div class="flex gap-2">
                        <Button size=ButtonSize::Sm attr:disabled=move || loading.get() on:click=on_fetch>
                            <span class="inline-flex items-center gap-2">
                                <Show when=move || loading.get() fallback=|| ().into_view()>
                                    <Spinner />
                                </Show>
                                "Fetch stats"
                            </span>
                        </Button>
                        <Button variant=ButtonVariant::Outline size=ButtonSize::Sm on:click=fill_registered>
                            "Use registered players"
                        </Button>
                    </div>
                </div>

                <Show when=move || error.get().is_some() fallback=|| ().into_view()>
                    {move || {
                        error.get().map(|e| view! {
                            <Alert class="border-destructive/30">
                                <AlertDescription class="text-destructive text-xs">{e}</AlertDescription>
                            </Alert>
                        })
                    }}
                </Show>

                {move || table.get().map(|t| view! { <StatsTableView table=t /> })}
            </CardContent>
        </Card>
    }
}

#[component]
fn StatsTableView(table: StatsTable) -> impl IntoView {
    view! {
        <table id="player-stats" class="w-full text-sm">
            <tbody>
                {table
                    .rows
                    .into_iter()
                    .map(|row| view! {
                        <tr class="border-t align-top">
                            <td class="py-2 pr-4 font-medium">{row.player}</td>
                            <td class="py-2">
                                <div class="flex flex-wrap gap-4">
                                    {row
                                        .types
                                        .into_iter()
                                        .map(|t| view! {
                                            <table class="text-xs">
                                                <thead>
                                                    <tr><th colspan="2" class="pb-1 text-left">{t.tournament_type}</th></tr>
                                                </thead>
                                                <tbody>
                                                    {t
                                                        .stats
                                                        .into_iter()
                                                        .map(|(name, value)| view! {
                                                            <tr>
                                                                <td class="pr-3 text-muted-foreground">{name}</td>
                                                                <td>{value}</td>
                                                            </tr>
                                                        })
                                                        .collect_view()}
                                                </tbody>
                                            </table>
                                        })
                                        .collect_view()}
                                </div>
                            </td>
                        </tr>
                    })
                    .collect_view()}
            </tbody>
        </table>
    }
}

#[component]
pub fn CheckInPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let state = app_state.0;

    let tournament_id: RwSignal<String> = RwSignal::new(String::new());
    let token: RwSignal<String> = RwSignal::new(String::new());
    let identifiers: RwSignal<String> = RwSignal::new(String::new());
    let error: RwSignal<Option<String>> = RwSignal::new(None);
    let batch: RwSignal<Option<CheckInBatch>> = RwSignal::new(None);

    // Results of an older submission must not land on the rows of a newer one.
    let batch_id: RwSignal<u64> = RwSignal::new(0);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let tournament_input = tournament_id.get_untracked();
        let next = match CheckInBatch::new(&tournament_input, &identifiers.get_untracked()) {
            Ok(b) => b,
            Err(e) => {
                error.set(Some(e));
                return;
            }
        };
        if token.get_untracked().trim().is_empty() {
            error.set(Some("Battlefy token is required".to_string()));
            return;
        }
        error.set(None);

        let authorization = normalize_bearer(&token.get_untracked());
        let api_client = state.api_client.get_untracked();
        let id = batch_id.get_untracked().wrapping_add(1);
        batch_id.set(id);

        log::info!("checking in {} teams for {}", next.rows.len(), next.tournament_id);

        let tournament = next.tournament_id.clone();
        let teams: Vec<String> = next.rows.iter().map(|r| r.team_id.clone()).collect();
        batch.set(Some(next));

        for (index, team) in teams.into_iter().enumerate() {
            let api_client = api_client.clone();
            let authorization = authorization.clone();
            let tournament = tournament.clone();
            spawn_local(async move {
                let outcome = api_client
                    .check_in(&tournament, &team, &authorization)
                    .await;
                if batch_id.try_get_untracked() != Some(id) {
                    return;
                }
                if let Err(e) = &outcome {
                    if e.kind == ApiErrorKind::Unauthorized {
                        let _ = error.try_set(Some(format!("Battlefy rejected the token: {e}")));
                    }
                }
                let outcome = outcome.map_err(|e| e.to_string());
                let _ = batch.try_update(|b| {
                    if let Some(b) = b.as_mut() {
                        b.resolve(index, outcome);
                    }
                });
            });
        }
    };

    view! {
        <Card>
            <CardHeader>
                <CardTitle>"Battlefy check-in"</CardTitle>
                <CardDescription>"Each team is checked in on its own; failures only affect their row."</CardDescription>
            </CardHeader>
            <CardContent class="flex flex-col gap-4">
                <form class="flex flex-col gap-3" on:submit=on_submit>
                    <div class="flex flex-col gap-1.5">
                        <Label html_for="checkin-tournament" class="text-xs">"Tournament id"</Label>
                        <Input id="checkin-tournament" bind_value=tournament_id class="h-8 text-sm" />
                    </div>
                    <div class="flex flex-col gap-1.5">
                        <Label html_for="checkin-token" class="text-xs">"Bearer token"</Label>
                        <Input id="checkin-token" r#type="password" bind_value=token class="h-8 text-sm" />
                    </div>
                    <div class="flex flex-col gap-1.5">
                        <Label html_for="checkin-teams" class="text-xs">"Team ids"</Label>
                        <Textarea id="checkin-teams" placeholder="One team id per line" bind_value=identifiers rows=6 />
                    </div>
                    <Button size=ButtonSize::Sm>"Check in"</Button>
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
                    batch.get().map(|b| view! {
                        <div class="flex flex-col gap-2">
                            <div class="text-xs text-muted-foreground">
                                {format!("{} checked in, {} failed, {} pending", b.checked_in(), b.failed(), b.pending())}
                            </div>
                            <ul class="flex flex-col gap-1 text-sm">
                                {b.rows
                                    .into_iter()
                                    .map(|row| {
                                        let (row_class, badge) = match row.status {
                                            CheckInStatus::Pending => (
                                                "checkin-pending",
                                                view! { <Spinner /> }.into_any(),
                                            ),
                                            CheckInStatus::CheckedIn => (
                                                "checkin-ok",
                                                view! { <Badge class=BADGE_SUCCESS>"Checked in"</Badge> }.into_any(),
                                            ),
                                            CheckInStatus::Failed(reason) => (
                                                "checkin-failed",
                                                view! { <Badge class=BADGE_DANGER attr:title=reason>"Failed"</Badge> }.into_any(),
                                            ),
                                        };
                                        view! {
                                            <li class=format!("{row_class} flex items-center justify-between gap-2")>
                                                <code class="text-xs">{row.team_id}</code>
                                                {badge}
                                            </li>
                                        }
                                    })
                                    .collect_view()}
                            </ul>
                        </div>
                    })
                }}
            </CardContent>
        </Card>
    }
}
