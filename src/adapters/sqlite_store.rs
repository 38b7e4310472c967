//! SQLite game store.
//!
//! Implements the sync [`GameStore`] port over sqlx by owning a
//! current-thread tokio runtime and blocking on each call. Compound
//! mutations (money adjustment + ledger append, transfers, space +
//! property-state creation) run inside a single transaction so a crash
//! cannot leave half a movement behind.

use std::str::FromStr;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions},
    Row,
};
use tokio::runtime::{Builder, Runtime};

use crate::{
    error::Error,
    models::{BoardSpace, GameSession, GameStatus, NewSpace, Player, PropertyState},
    ports::GameStore,
    Result,
};

/// Relational schema, applied only by the operator-confirmed reset flow.
const SCHEMA: &str = r#"
DROP TABLE IF EXISTS transactions;
DROP TABLE IF EXISTS property_states;
DROP TABLE IF EXISTS spaces;
DROP TABLE IF EXISTS players;
DROP TABLE IF EXISTS game_sessions;

CREATE TABLE game_sessions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    status TEXT NOT NULL DEFAULT 'setup',
    current_turn_player_id INTEGER,
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE players (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    game_id INTEGER NOT NULL REFERENCES game_sessions (id),
    name TEXT NOT NULL,
    money INTEGER NOT NULL,
    position INTEGER NOT NULL DEFAULT 0,
    is_active INTEGER NOT NULL DEFAULT 1,
    turn_order INTEGER NOT NULL
);

CREATE TABLE spaces (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    game_id INTEGER NOT NULL REFERENCES game_sessions (id),
    sequence_order INTEGER NOT NULL,
    name TEXT NOT NULL,
    kind TEXT NOT NULL,
    description TEXT,
    purchase_cost INTEGER,
    base_rent INTEGER,
    event_amount INTEGER NOT NULL DEFAULT 0,
    move_target INTEGER,
    UNIQUE (game_id, sequence_order)
);

CREATE TABLE property_states (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    game_id INTEGER NOT NULL REFERENCES game_sessions (id),
    space_id INTEGER NOT NULL REFERENCES spaces (id),
    owner_id INTEGER REFERENCES players (id),
    improvement_count INTEGER NOT NULL DEFAULT 0,
    UNIQUE (game_id, space_id)
);

CREATE TABLE transactions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    game_id INTEGER NOT NULL REFERENCES game_sessions (id),
    player_id INTEGER NOT NULL REFERENCES players (id),
    amount INTEGER NOT NULL,
    memo TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
);
"#;

/// SQLite-backed [`GameStore`].
pub struct SqliteStore {
    rt: Runtime,
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating the file if needed) the database at `database_url`,
    /// e.g. `sqlite://monopoly.db` or `sqlite::memory:`.
    pub fn connect(database_url: &str) -> Result<Self> {
        let rt = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|source| Error::Runtime {
                operation: "build tokio runtime for the SQLite store".to_string(),
                source,
            })?;
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = rt.block_on(
            SqlitePoolOptions::new()
                .max_connections(1)
                .connect_with(options),
        )?;
        Ok(Self { rt, pool })
    }

    async fn adjust_money_tx(
        pool: &SqlitePool,
        game_id: i64,
        player_id: i64,
        delta: i64,
        memo: &str,
    ) -> Result<Player> {
        let mut tx = pool.begin().await?;
        let player = sqlx::query_as::<_, Player>(
            "UPDATE players SET money = money + ? WHERE id = ? RETURNING *",
        )
        .bind(delta)
        .bind(player_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(Error::PlayerNotFound { player_id })?;
        sqlx::query("INSERT INTO transactions (game_id, player_id, amount, memo) VALUES (?, ?, ?, ?)")
            .bind(game_id)
            .bind(player_id)
            .bind(delta)
            .bind(memo)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(player)
    }
}

impl GameStore for SqliteStore {
    fn create_game(&self, status: GameStatus) -> Result<GameSession> {
        self.rt.block_on(async {
            let game = sqlx::query_as::<_, GameSession>(
                "INSERT INTO game_sessions (status) VALUES (?) RETURNING *",
            )
            .bind(status)
            .fetch_one(&self.pool)
            .await?;
            Ok(game)
        })
    }

    fn get_game(&self, game_id: i64) -> Result<Option<GameSession>> {
        self.rt.block_on(async {
            let game = sqlx::query_as::<_, GameSession>("SELECT * FROM game_sessions WHERE id = ?")
                .bind(game_id)
                .fetch_optional(&self.pool)
                .await?;
            Ok(game)
        })
    }

    fn update_game_status(&self, game_id: i64, status: GameStatus) -> Result<()> {
        self.rt.block_on(async {
            sqlx::query("UPDATE game_sessions SET status = ? WHERE id = ?")
                .bind(status)
                .bind(game_id)
                .execute(&self.pool)
                .await?;
            Ok(())
        })
    }

    fn set_current_turn(&self, game_id: i64, player_id: i64) -> Result<()> {
        self.rt.block_on(async {
            sqlx::query("UPDATE game_sessions SET current_turn_player_id = ? WHERE id = ?")
                .bind(player_id)
                .bind(game_id)
                .execute(&self.pool)
                .await?;
            Ok(())
        })
    }

    fn add_player(
        &self,
        game_id: i64,
        name: &str,
        starting_money: i64,
        turn_order: i64,
    ) -> Result<Player> {
        self.rt.block_on(async {
            let player = sqlx::query_as::<_, Player>(
                "INSERT INTO players (game_id, name, money, turn_order) \
                 VALUES (?, ?, ?, ?) RETURNING *",
            )
            .bind(game_id)
            .bind(name)
            .bind(starting_money)
            .bind(turn_order)
            .fetch_one(&self.pool)
            .await?;
            Ok(player)
        })
    }

    fn list_players(&self, game_id: i64, active_only: bool) -> Result<Vec<Player>> {
        self.rt.block_on(async {
            let sql = if active_only {
                "SELECT * FROM players WHERE game_id = ? AND is_active = 1 ORDER BY turn_order ASC"
            } else {
                "SELECT * FROM players WHERE game_id = ? ORDER BY turn_order ASC"
            };
            let players = sqlx::query_as::<_, Player>(sql)
                .bind(game_id)
                .fetch_all(&self.pool)
                .await?;
            Ok(players)
        })
    }

    fn get_player(&self, player_id: i64) -> Result<Option<Player>> {
        self.rt.block_on(async {
            let player = sqlx::query_as::<_, Player>("SELECT * FROM players WHERE id = ?")
                .bind(player_id)
                .fetch_optional(&self.pool)
                .await?;
            Ok(player)
        })
    }

    fn update_player_position(&self, player_id: i64, position: i64) -> Result<()> {
        self.rt.block_on(async {
            sqlx::query("UPDATE players SET position = ? WHERE id = ?")
                .bind(position)
                .bind(player_id)
                .execute(&self.pool)
                .await?;
            Ok(())
        })
    }

    fn update_player_active(&self, player_id: i64, is_active: bool) -> Result<()> {
        self.rt.block_on(async {
            sqlx::query("UPDATE players SET is_active = ? WHERE id = ?")
                .bind(is_active)
                .bind(player_id)
                .execute(&self.pool)
                .await?;
            Ok(())
        })
    }

    fn adjust_money(
        &self,
        game_id: i64,
        player_id: i64,
        delta: i64,
        memo: &str,
    ) -> Result<Player> {
        self.rt
            .block_on(Self::adjust_money_tx(&self.pool, game_id, player_id, delta, memo))
    }

    fn set_money(&self, player_id: i64, amount: i64) -> Result<Player> {
        self.rt.block_on(async {
            let mut tx = self.pool.begin().await?;
            let before = sqlx::query_as::<_, Player>("SELECT * FROM players WHERE id = ?")
                .bind(player_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or(Error::PlayerNotFound { player_id })?;
            let player = sqlx::query_as::<_, Player>(
                "UPDATE players SET money = ? WHERE id = ? RETURNING *",
            )
            .bind(amount)
            .bind(player_id)
            .fetch_one(&mut *tx)
            .await?;
            sqlx::query(
                "INSERT INTO transactions (game_id, player_id, amount, memo) VALUES (?, ?, ?, ?)",
            )
            .bind(before.game_id)
            .bind(player_id)
            .bind(amount - before.money)
            .bind("Balance set")
            .execute(&mut *tx)
            .await?;
            tx.commit().await?;
            Ok(player)
        })
    }

    fn transfer_money(
        &self,
        game_id: i64,
        payer_id: i64,
        payee_id: i64,
        amount: i64,
        memo: &str,
    ) -> Result<()> {
        self.rt.block_on(async {
            let mut tx = self.pool.begin().await?;
            for (player_id, delta, entry) in [
                (payer_id, -amount, format!("Paid {amount} for {memo}")),
                (payee_id, amount, format!("Received {amount} for {memo}")),
            ] {
                let updated = sqlx::query("UPDATE players SET money = money + ? WHERE id = ?")
                    .bind(delta)
                    .bind(player_id)
                    .execute(&mut *tx)
                    .await?;
                if updated.rows_affected() == 0 {
                    return Err(Error::PlayerNotFound { player_id });
                }
                sqlx::query(
                    "INSERT INTO transactions (game_id, player_id, amount, memo) \
                     VALUES (?, ?, ?, ?)",
                )
                .bind(game_id)
                .bind(player_id)
                .bind(delta)
                .bind(&entry)
                .execute(&mut *tx)
                .await?;
            }
            tx.commit().await?;
            Ok(())
        })
    }

    fn reset_turn_orders(&self, game_id: i64) -> Result<()> {
        self.rt.block_on(async {
            let mut tx = self.pool.begin().await?;
            let ids: Vec<i64> = sqlx::query(
                "SELECT id FROM players WHERE game_id = ? AND is_active = 1 \
                 ORDER BY turn_order ASC",
            )
            .bind(game_id)
            .fetch_all(&mut *tx)
            .await?
            .into_iter()
            .map(|row| row.get::<i64, _>("id"))
            .collect();
            for (rank, player_id) in ids.into_iter().enumerate() {
                sqlx::query("UPDATE players SET turn_order = ? WHERE id = ?")
                    .bind(rank as i64)
                    .bind(player_id)
                    .execute(&mut *tx)
                    .await?;
            }
            tx.commit().await?;
            Ok(())
        })
    }

    fn remove_player(&self, player_id: i64) -> Result<()> {
        self.rt.block_on(async {
            sqlx::query("DELETE FROM players WHERE id = ?")
                .bind(player_id)
                .execute(&self.pool)
                .await?;
            Ok(())
        })
    }

    fn add_space(&self, space: &NewSpace) -> Result<BoardSpace> {
        self.rt.block_on(async {
            let mut tx = self.pool.begin().await?;
            let row = sqlx::query_as::<_, BoardSpace>(
                "INSERT INTO spaces (game_id, sequence_order, name, kind, description, \
                 purchase_cost, base_rent, event_amount, move_target) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING *",
            )
            .bind(space.game_id)
            .bind(space.sequence_order)
            .bind(&space.name)
            .bind(space.kind)
            .bind(&space.description)
            .bind(space.purchase_cost)
            .bind(space.base_rent)
            .bind(space.event_amount)
            .bind(space.move_target)
            .fetch_one(&mut *tx)
            .await?;
            if row.is_property() {
                sqlx::query(
                    "INSERT INTO property_states (game_id, space_id, owner_id, improvement_count) \
                     VALUES (?, ?, NULL, 0)",
                )
                .bind(row.game_id)
                .bind(row.id)
                .execute(&mut *tx)
                .await?;
            }
            tx.commit().await?;
            Ok(row)
        })
    }

    fn list_spaces(&self, game_id: i64) -> Result<Vec<BoardSpace>> {
        self.rt.block_on(async {
            let spaces = sqlx::query_as::<_, BoardSpace>(
                "SELECT * FROM spaces WHERE game_id = ? ORDER BY sequence_order ASC",
            )
            .bind(game_id)
            .fetch_all(&self.pool)
            .await?;
            Ok(spaces)
        })
    }

    fn get_space_by_order(
        &self,
        game_id: i64,
        sequence_order: i64,
    ) -> Result<Option<BoardSpace>> {
        self.rt.block_on(async {
            let space = sqlx::query_as::<_, BoardSpace>(
                "SELECT * FROM spaces WHERE game_id = ? AND sequence_order = ?",
            )
            .bind(game_id)
            .bind(sequence_order)
            .fetch_optional(&self.pool)
            .await?;
            Ok(space)
        })
    }

    fn get_space_by_id(&self, space_id: i64) -> Result<Option<BoardSpace>> {
        self.rt.block_on(async {
            let space = sqlx::query_as::<_, BoardSpace>("SELECT * FROM spaces WHERE id = ?")
                .bind(space_id)
                .fetch_optional(&self.pool)
                .await?;
            Ok(space)
        })
    }

    fn count_spaces(&self, game_id: i64) -> Result<i64> {
        self.rt.block_on(async {
            let count =
                sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM spaces WHERE game_id = ?")
                    .bind(game_id)
                    .fetch_one(&self.pool)
                    .await?;
            Ok(count)
        })
    }

    fn next_sequence_order(&self, game_id: i64) -> Result<i64> {
        self.rt.block_on(async {
            let next = sqlx::query_scalar::<_, i64>(
                "SELECT COALESCE(MAX(sequence_order) + 1, 0) FROM spaces WHERE game_id = ?",
            )
            .bind(game_id)
            .fetch_one(&self.pool)
            .await?;
            Ok(next)
        })
    }

    fn get_property_state(&self, game_id: i64, space_id: i64) -> Result<Option<PropertyState>> {
        self.rt.block_on(async {
            let state = sqlx::query_as::<_, PropertyState>(
                "SELECT * FROM property_states WHERE game_id = ? AND space_id = ?",
            )
            .bind(game_id)
            .bind(space_id)
            .fetch_optional(&self.pool)
            .await?;
            Ok(state)
        })
    }

    fn set_property_owner(
        &self,
        game_id: i64,
        space_id: i64,
        owner_id: Option<i64>,
        improvement_count: Option<i64>,
    ) -> Result<()> {
        self.rt.block_on(async {
            let result = if let Some(count) = improvement_count {
                sqlx::query(
                    "UPDATE property_states SET owner_id = ?, improvement_count = ? \
                     WHERE game_id = ? AND space_id = ?",
                )
                .bind(owner_id)
                .bind(count)
                .bind(game_id)
                .bind(space_id)
                .execute(&self.pool)
                .await?
            } else {
                sqlx::query(
                    "UPDATE property_states SET owner_id = ? \
                     WHERE game_id = ? AND space_id = ?",
                )
                .bind(owner_id)
                .bind(game_id)
                .bind(space_id)
                .execute(&self.pool)
                .await?
            };
            if result.rows_affected() == 0 {
                return Err(Error::PropertyStateMissing { space_id });
            }
            Ok(())
        })
    }

    fn increment_improvement(&self, game_id: i64, space_id: i64) -> Result<PropertyState> {
        self.rt.block_on(async {
            let state = sqlx::query_as::<_, PropertyState>(
                "UPDATE property_states SET improvement_count = improvement_count + 1 \
                 WHERE game_id = ? AND space_id = ? RETURNING *",
            )
            .bind(game_id)
            .bind(space_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(Error::PropertyStateMissing { space_id })?;
            Ok(state)
        })
    }

    fn properties_by_owner(
        &self,
        game_id: i64,
        owner_id: i64,
    ) -> Result<Vec<(BoardSpace, PropertyState)>> {
        self.rt.block_on(async {
            let states = sqlx::query_as::<_, PropertyState>(
                "SELECT * FROM property_states WHERE game_id = ? AND owner_id = ?",
            )
            .bind(game_id)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;
            let mut owned = Vec::with_capacity(states.len());
            for state in states {
                let space =
                    sqlx::query_as::<_, BoardSpace>("SELECT * FROM spaces WHERE id = ?")
                        .bind(state.space_id)
                        .fetch_optional(&self.pool)
                        .await?
                        .ok_or(Error::PropertyStateMissing {
                            space_id: state.space_id,
                        })?;
                owned.push((space, state));
            }
            owned.sort_by_key(|(space, _)| space.sequence_order);
            Ok(owned)
        })
    }

    fn release_properties_to_bank(&self, game_id: i64, owner_id: i64) -> Result<()> {
        self.rt.block_on(async {
            sqlx::query(
                "UPDATE property_states SET owner_id = NULL, improvement_count = 0 \
                 WHERE game_id = ? AND owner_id = ?",
            )
            .bind(game_id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;
            Ok(())
        })
    }

    fn apply_schema(&self) -> Result<()> {
        self.rt.block_on(async {
            sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
            Ok(())
        })
    }
}
