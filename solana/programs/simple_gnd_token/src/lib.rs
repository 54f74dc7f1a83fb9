use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token::{self, Burn, Mint, MintTo, Token, TokenAccount, Transfer},
};

declare_id!("DKxK9wrg8ziNLLUWGcVgfwF6NWBrPzLcYGjebTSDZgEh");

pub const STATE_SEED: &[u8] = b"token_state";
pub const MINT_SEED: &[u8] = b"mint";

/// SPL mints conventionally use 9 decimals on Solana.
pub const TOKEN_DECIMALS: u8 = 9;

#[program]
pub mod simple_gnd_token {
    use super::*;

    /// Create the token and mint `initial_supply` to the owner's associated account.
    pub fn initialize(ctx: Context<Initialize>, initial_supply: u64) -> Result<()> {
        let state = &mut ctx.accounts.state;
        state.owner = ctx.accounts.owner.key();
        state.mint = ctx.accounts.mint.key();
        state.bump = ctx.bumps.state;

        if initial_supply > 0 {
            let bump = ctx.accounts.state.bump;
            let seeds = &[STATE_SEED, &[bump]];
            let signer = &[&seeds[..]];
            let cpi_accounts = MintTo {
                mint: ctx.accounts.mint.to_account_info(),
                to: ctx.accounts.owner_token.to_account_info(),
                authority: ctx.accounts.state.to_account_info(),
            };
            let cpi_ctx =
                CpiContext::new_with_signer(ctx.accounts.token_program.to_account_info(), cpi_accounts, signer);
            token::mint_to(cpi_ctx, initial_supply)?;
        }

        msg!("SimpleGND initialized: {} units minted to owner", initial_supply);
        emit!(SupplyMinted {
            to: ctx.accounts.owner_token.key(),
            amount: initial_supply,
            total_supply: initial_supply,
        });
        Ok(())
    }

    /// Read-only balance of a holder token account; returned via return data.
    pub fn balance_of(ctx: Context<BalanceOf>) -> Result<u64> {
        let amount = ctx.accounts.holder_token.amount;
        msg!("Balance of {}: {}", ctx.accounts.holder_token.key(), amount);
        Ok(amount)
    }

    pub fn transfer_tokens(ctx: Context<TransferTokens>, amount: u64) -> Result<()> {
        require!(ctx.accounts.from.amount >= amount, TokenError::InsufficientBalance);

        let cpi_accounts = Transfer {
            from: ctx.accounts.from.to_account_info(),
            to: ctx.accounts.to.to_account_info(),
            authority: ctx.accounts.holder.to_account_info(),
        };
        let cpi_ctx = CpiContext::new(ctx.accounts.token_program.to_account_info(), cpi_accounts);
        token::transfer(cpi_ctx, amount)?;

        msg!("Transferred {} units", amount);
        Ok(())
    }

    /// Owner-only issuance of new supply. Supply is read back from the mint,
    /// which stays authoritative even for burns made outside this program.
    pub fn mint_tokens(ctx: Context<MintTokens>, amount: u64) -> Result<()> {
        increase_supply(ctx.accounts.mint.supply, amount)?;

        let bump = ctx.accounts.state.bump;
        let seeds = &[STATE_SEED, &[bump]];
        let signer = &[&seeds[..]];
        let cpi_accounts = MintTo {
            mint: ctx.accounts.mint.to_account_info(),
            to: ctx.accounts.to.to_account_info(),
            authority: ctx.accounts.state.to_account_info(),
        };
        let cpi_ctx =
            CpiContext::new_with_signer(ctx.accounts.token_program.to_account_info(), cpi_accounts, signer);
        token::mint_to(cpi_ctx, amount)?;

        ctx.accounts.mint.reload()?;
        let total_supply = ctx.accounts.mint.supply;

        msg!("Minted {} units, supply now {}", amount, total_supply);
        emit!(SupplyMinted {
            to: ctx.accounts.to.key(),
            amount,
            total_supply,
        });
        Ok(())
    }

    pub fn burn_tokens(ctx: Context<BurnTokens>, amount: u64) -> Result<()> {
        require!(ctx.accounts.from.amount >= amount, TokenError::InsufficientBalance);

        let cpi_accounts = Burn {
            mint: ctx.accounts.mint.to_account_info(),
            from: ctx.accounts.from.to_account_info(),
            authority: ctx.accounts.holder.to_account_info(),
        };
        let cpi_ctx = CpiContext::new(ctx.accounts.token_program.to_account_info(), cpi_accounts);
        token::burn(cpi_ctx, amount)?;

        ctx.accounts.mint.reload()?;
        let total_supply = ctx.accounts.mint.supply;

        msg!("Burned {} units, supply now {}", amount, total_supply);
        emit!(TokensBurned {
            from: ctx.accounts.from.key(),
            amount,
            total_supply,
        });
        Ok(())
    }

    pub fn set_owner(ctx: Context<SetOwner>, new_owner: Pubkey) -> Result<()> {
        let state = &mut ctx.accounts.state;
        let previous = state.owner;
        state.owner = new_owner;

        msg!("Ownership transferred from {} to {}", previous, new_owner);
        emit!(OwnerChanged {
            previous,
            new_owner,
        });
        Ok(())
    }
}

#[derive(Accounts)]
pub struct Initialize<'info> {
    #[account(mut)]
    pub owner: Signer<'info>,
    #[account(
        init,
        payer = owner,
        space = 8 + TokenState::LEN,
        seeds = [STATE_SEED],
        bump
    )]
    pub state: Account<'info, TokenState>,
    #[account(
        init,
        payer = owner,
        seeds = [MINT_SEED],
        bump,
        mint::decimals = TOKEN_DECIMALS,
        mint::authority = state
    )]
    pub mint: Account<'info, Mint>,
    #[account(
        init,
        payer = owner,
        associated_token::mint = mint,
        associated_token::authority = owner
    )]
    pub owner_token: Account<'info, TokenAccount>,
    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub rent: Sysvar<'info, Rent>,
}

#[derive(Accounts)]
pub struct BalanceOf<'info> {
    #[account(seeds = [STATE_SEED], bump = state.bump)]
    pub state: Account<'info, TokenState>,
    #[account(constraint = holder_token.mint == state.mint @ TokenError::MintMismatch)]
    pub holder_token: Account<'info, TokenAccount>,
}

#[derive(Accounts)]
pub struct TransferTokens<'info> {
    #[account(seeds = [STATE_SEED], bump = state.bump)]
    pub state: Account<'info, TokenState>,
    pub holder: Signer<'info>,
    #[account(
        mut,
        constraint = from.mint == state.mint @ TokenError::MintMismatch,
        constraint = from.owner == holder.key() @ TokenError::Unauthorized
    )]
    pub from: Account<'info, TokenAccount>,
    #[account(mut, constraint = to.mint == state.mint @ TokenError::MintMismatch)]
    pub to: Account<'info, TokenAccount>,
    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct MintTokens<'info> {
    #[account(
        seeds = [STATE_SEED],
        bump = state.bump,
        has_one = owner @ TokenError::Unauthorized,
        has_one = mint @ TokenError::MintMismatch
    )]
    pub state: Account<'info, TokenState>,
    pub owner: Signer<'info>,
    #[account(mut)]
    pub mint: Account<'info, Mint>,
    #[account(mut, constraint = to.mint == mint.key() @ TokenError::MintMismatch)]
    pub to: Account<'info, TokenAccount>,
    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct BurnTokens<'info> {
    #[account(
        seeds = [STATE_SEED],
        bump = state.bump,
        has_one = mint @ TokenError::MintMismatch
    )]
    pub state: Account<'info, TokenState>,
    pub holder: Signer<'info>,
    #[account(mut)]
    pub mint: Account<'info, Mint>,
    #[account(
        mut,
        constraint = from.mint == mint.key() @ TokenError::MintMismatch,
        constraint = from.owner == holder.key() @ TokenError::Unauthorized
    )]
    pub from: Account<'info, TokenAccount>,
    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
pub struct SetOwner<'info> {
    #[account(
        mut,
        seeds = [STATE_SEED],
        bump = state.bump,
        has_one = owner @ TokenError::Unauthorized
    )]
    pub state: Account<'info, TokenState>,
    pub owner: Signer<'info>,
}

#[account]
pub struct TokenState {
    pub owner: Pubkey,
    pub mint: Pubkey,
    pub bump: u8,
}

impl TokenState {
    pub const LEN: usize = 32 + 32 + 1;
}

#[event]
pub struct SupplyMinted {
    pub to: Pubkey,
    pub amount: u64,
    pub total_supply: u64,
}

#[event]
pub struct TokensBurned {
    pub from: Pubkey,
    pub amount: u64,
    pub total_supply: u64,
}

#[event]
pub struct OwnerChanged {
    pub previous: Pubkey,
    pub new_owner: Pubkey,
}

#[error_code]
pub enum TokenError {
    #[msg("Unauthorized")]
    Unauthorized,
    #[msg("Token account belongs to a different mint")]
    MintMismatch,
    #[msg("Math overflow")]
    MathOverflow,
    #[msg("Insufficient balance")]
    InsufficientBalance,
}

fn increase_supply(current: u64, amount: u64) -> Result<u64> {
    Ok(current.checked_add(amount).ok_or(TokenError::MathOverflow)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supply_grows_by_minted_amount() {
        assert_eq!(increase_supply(1000, 250).unwrap(), 1250);
        assert_eq!(increase_supply(0, 1000).unwrap(), 1000);
    }

    #[test]
    fn supply_overflow_is_rejected() {
        assert!(increase_supply(u64::MAX, 1).is_err());
    }

    #[test]
    fn state_len_covers_all_fields() {
        let state = TokenState {
            owner: Pubkey::default(),
            mint: Pubkey::default(),
            bump: 255,
        };
        let mut buf = Vec::new();
        state.try_serialize(&mut buf).unwrap();
        assert_eq!(buf.len(), 8 + TokenState::LEN);
    }
}
